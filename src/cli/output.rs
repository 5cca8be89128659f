//! Output formatting for CLI commands

use std::fmt;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::ConfigError;
use crate::render::DisplayLine;

/// How rendered lines are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: "output.format".to_string(),
                message: format!("unknown format '{}'", other),
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Json => "json",
        };
        write!(f, "{}", s)
    }
}

/// Output context for consistent formatting across commands
///
/// Structured results go to stdout as JSON; rendered listings go to stdout
/// line by line.
#[derive(Debug, Clone)]
pub struct OutputContext {
    /// Working directory for relative path display
    root: PathBuf,
}

impl OutputContext {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Convert an absolute path to relative (if within the working directory)
    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| path.display().to_string())
    }

    /// Print a successful response
    pub fn print_success<T: Serialize>(&self, data: T) {
        let response = serde_json::json!({
            "success": true,
            "data": data
        });
        print_json(&response);
    }

    /// Print a successful response with flat structure (data fields at top level)
    pub fn print_success_flat<T: Serialize>(&self, data: T) {
        let mut response = serde_json::to_value(data).unwrap_or(serde_json::json!({}));
        if let Some(obj) = response.as_object_mut() {
            obj.insert("success".to_string(), serde_json::json!(true));
        }
        print_json(&response);
    }

    /// Print display lines, optionally prefixed by their definition id
    pub fn print_lines(&self, lines: &[DisplayLine], show_ids: bool) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        write_lines(&mut out, lines, show_ids)?;
        out.flush()
    }
}

fn write_lines(out: &mut impl Write, lines: &[DisplayLine], show_ids: bool) -> io::Result<()> {
    for line in lines {
        if show_ids {
            writeln!(
                out,
                "{}\t{}",
                line.definition_id.as_deref().unwrap_or(""),
                line.text
            )?;
        } else {
            writeln!(out, "{}", line.text)?;
        }
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}
