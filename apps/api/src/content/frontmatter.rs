//! Front matter splitting for content files.
//!
//! A content file opens with a `+++` line, carries TOML up to the next `+++`
//! line, and the markdown body follows.

use serde::de::DeserializeOwned;

use crate::content::ContentError;

const DELIMITER: &str = "+++";

/// A content file split into its TOML header and markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter<'a> {
    pub header: &'a str,
    pub body: &'a str,
}

impl<'a> FrontMatter<'a> {
    /// Decodes the TOML header into `T`. `file` only labels errors.
    pub fn decode<T: DeserializeOwned>(&self, file: &str) -> Result<T, ContentError> {
        toml::from_str(self.header).map_err(|source| ContentError::Toml {
            file: file.to_string(),
            source,
        })
    }
}

/// Splits `raw` into front matter and body. `file` only labels errors.
pub fn split<'a>(raw: &'a str, file: &str) -> Result<FrontMatter<'a>, ContentError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let missing = || ContentError::MissingFrontMatter(file.to_string());

    let (first, rest) = raw.split_once('\n').ok_or_else(missing)?;
    if first.trim_end() != DELIMITER {
        return Err(missing());
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let header = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Ok(FrontMatter { header, body });
        }
        offset += line.len();
    }
    Err(missing())
}
