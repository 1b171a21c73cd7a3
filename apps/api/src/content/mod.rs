// Static site content: markdown files with TOML front matter under CONTENT_DIR.

pub mod frontmatter;
pub mod handlers;
pub mod loader;

use thiserror::Error;

use crate::layout::LayoutError;

pub use loader::ContentStore;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Content file not found: {0}")]
    NotFound(String),

    #[error("Failed to read content: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} has no +++ front matter block")]
    MissingFrontMatter(String),

    #[error("Invalid front matter in {file}: {source}")]
    Toml {
        file: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Malformed(#[from] LayoutError),
}
