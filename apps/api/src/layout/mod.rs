// Résumé layout: font metrics, word wrap, and the paginated layout engine.
// Layout is CPU-bound and synchronous; async callers go through tokio::task::spawn_blocking.

pub mod command;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod font_metrics;
pub mod wrap;

// Re-export the public API consumed by other modules (render, cv service, handlers).
pub use command::{Alignment, DrawCommand, LayoutResult};
pub use config::LayoutConfig;
pub use engine::PaginatedLayoutEngine;
pub use error::LayoutError;
