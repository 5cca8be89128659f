//! Outline command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::App;

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Symbol tree JSON document
    pub input: PathBuf,
}

pub async fn execute(args: OutlineArgs, app: &App) -> Result<()> {
    let (_, file) = app.build(&args.input).await?;
    app.output.print_success(&file.navigation);
    Ok(())
}
