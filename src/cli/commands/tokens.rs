//! Tokens command implementation
//!
//! Dumps the raw token stream, markers included, for downstream tooling.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::models::token::Token;

#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Symbol tree JSON document
    pub input: PathBuf,

    /// Omit non-printing marker tokens
    #[arg(long)]
    pub no_markers: bool,
}

#[derive(Serialize)]
struct TokensResponse<'a> {
    count: usize,
    tokens: Vec<&'a Token>,
}

pub async fn execute(args: TokensArgs, app: &App) -> Result<()> {
    let (_, file) = app.build(&args.input).await?;
    let tokens: Vec<&Token> = file
        .tokens
        .iter()
        .filter(|t| !args.no_markers || !t.kind.is_marker())
        .collect();
    app.output.print_success(TokensResponse {
        count: tokens.len(),
        tokens,
    });
    Ok(())
}
