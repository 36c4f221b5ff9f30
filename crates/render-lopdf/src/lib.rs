//! PDF output for laid-out documents.
//!
//! The whole document is assembled in memory with `lopdf` and serialized in
//! one step, so callers either get a complete PDF or an error.

mod error;
mod helpers;
mod xobject;
mod renderer;

pub use error::RenderError;
pub use helpers::{font_resource_name, to_text_string, to_win_ansi};
pub use renderer::LopdfRenderer;
