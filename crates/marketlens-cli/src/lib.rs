//! Command-line surface for the move/news correlation pipeline
//!
//! The binary wires one price provider and one news provider into a
//! [`pipeline::Pipeline`], runs a single analysis, and renders the result to
//! the terminal.

pub mod pipeline;
pub mod render;

pub use pipeline::{Analysis, Pipeline};
pub use render::{NullRenderer, Renderer, TerminalRenderer, narrative_text};
