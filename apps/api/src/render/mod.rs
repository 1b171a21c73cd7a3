// Folds layout output into document bytes. Pure and synchronous like the layout pass.

pub mod pdf;

pub use pdf::{render_pdf, RenderError};
