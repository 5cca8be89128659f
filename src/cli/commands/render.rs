//! Render command implementation
//!
//! Builds the token stream for one symbol document and prints its lines.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::cli::output::OutputFormat;
use crate::render::{DisplayLine, HtmlStyle, PlainStyle};

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Symbol tree JSON document
    pub input: PathBuf,

    /// Output format (default from config: output.format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Prefix each line with its definition id
    #[arg(long)]
    pub ids: bool,
}

#[derive(Serialize)]
struct RenderResponse {
    assembly: String,
    line_count: usize,
    lines: Vec<DisplayLine>,
}

pub async fn execute(args: RenderArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let (assembly, file) = app.build(&args.input).await?;

    let format = match args.format {
        Some(format) => format,
        None => app.config().output.format.parse()?,
    };
    let show_ids = args.ids || app.config().output.show_ids;
    tracing::debug!("Rendering {} as {}", ctx.relative_path(&args.input), format);

    match format {
        OutputFormat::Text => ctx.print_lines(&file.render(&PlainStyle), show_ids)?,
        OutputFormat::Html => ctx.print_lines(&file.render(&HtmlStyle), show_ids)?,
        OutputFormat::Json => {
            let lines = file.render(&PlainStyle);
            ctx.print_success(RenderResponse {
                assembly: assembly.display_name(),
                line_count: lines.len(),
                lines,
            });
        }
    }
    Ok(())
}
