use thiserror::Error;

/// Errors raised by a layout pass. No partial output accompanies either variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A required field is absent or blank. Caller decides whether to abort.
    #[error("Malformed résumé input: missing or empty field '{field}'")]
    MalformedInput { field: String },

    /// A command would land below the usable height with no page break left
    /// to take. Indicates an engine bug or an unsatisfiable config.
    #[error("Layout overflow on page {page_index}: y={y} exceeds bound {bound}")]
    Overflow { page_index: u32, y: f32, bound: f32 },
}
