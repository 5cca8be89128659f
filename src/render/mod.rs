//! Rendering pipeline
//!
//! Ordering policy, visibility filter, token stream builder and line renderer.
//! Building and rendering are separate passes: one [`CodeFile`] can be
//! rendered any number of times with different [`LineStyle`]s.

pub mod builder;
pub mod constants;
pub mod ids;
pub mod index;
pub mod lines;
pub mod ordering;
pub mod visibility;
pub mod writer;

pub use builder::{CodeFile, TokenStreamBuilder};
pub use lines::{DisplayLine, HtmlStyle, LineStyle, PlainStyle, RenderFlags, render_lines};
pub use ordering::{DefaultOrdering, OrderingPolicy};
pub use visibility::VisibilityFilter;

use crate::config::RenderPolicy;
use crate::error::BuildError;
use crate::models::symbol::Assembly;

/// Build with the default ordering policy
pub fn build_code_file(assembly: &Assembly, policy: &RenderPolicy) -> Result<CodeFile, BuildError> {
    TokenStreamBuilder::new(policy, &DefaultOrdering).build(assembly)
}

impl CodeFile {
    pub fn render(&self, style: &dyn LineStyle) -> Vec<DisplayLine> {
        render_lines(&self.tokens, style)
    }
}
