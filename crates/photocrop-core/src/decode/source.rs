//! Typed image source references.

use std::path::PathBuf;

use crate::data_url::parse_data_url;

use super::DecodeError;

/// Where an image comes from.
///
/// Parsed from the string the crop dialog is given: an inline data URI, a
/// `file://` URL or local path, or any other URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// Inline image data.
    DataUri {
        /// Declared media type, lowercased.
        mime: String,
        /// Decoded payload.
        bytes: Vec<u8>,
    },
    /// A file on the local filesystem.
    File(PathBuf),
    /// A remote URL (`http`, `https`, `blob`, ...).
    Url(String),
}

impl SourceRef {
    /// Parse a source string.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidSource` for empty strings and malformed
    /// data URIs.
    pub fn parse(source: &str) -> Result<Self, DecodeError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(DecodeError::InvalidSource("empty source".to_string()));
        }

        if has_scheme(source, "data") {
            let (mime, bytes) = parse_data_url(source)?;
            return Ok(SourceRef::DataUri { mime, bytes });
        }

        if has_scheme(source, "file") {
            let rest = &source["file:".len()..];
            let path = rest.strip_prefix("//").unwrap_or(rest);
            if path.is_empty() {
                return Err(DecodeError::InvalidSource("file URL has no path".to_string()));
            }
            return Ok(SourceRef::File(PathBuf::from(path)));
        }

        if let Some((scheme, _)) = source.split_once("://") {
            let valid_scheme = !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
            if valid_scheme {
                return Ok(SourceRef::Url(source.to_string()));
            }
        }
        if has_scheme(source, "blob") {
            return Ok(SourceRef::Url(source.to_string()));
        }

        Ok(SourceRef::File(PathBuf::from(source)))
    }

    /// Short description for error messages, never the full payload.
    pub fn describe(&self) -> String {
        match self {
            SourceRef::DataUri { mime, bytes } => format!("data URI ({mime}, {} bytes)", bytes.len()),
            SourceRef::File(path) => path.display().to_string(),
            SourceRef::Url(url) => url.clone(),
        }
    }
}

fn has_scheme(source: &str, scheme: &str) -> bool {
    source
        .get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        && source.as_bytes().get(scheme.len()) == Some(&b':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_uri() {
        let src = SourceRef::parse("data:image/png;base64,YWJj").unwrap();
        assert_eq!(
            src,
            SourceRef::DataUri {
                mime: "image/png".to_string(),
                bytes: b"abc".to_vec()
            }
        );
    }

    #[test]
    fn test_parse_file_url() {
        let src = SourceRef::parse("file:///tmp/me.jpg").unwrap();
        assert_eq!(src, SourceRef::File(PathBuf::from("/tmp/me.jpg")));
    }

    #[test]
    fn test_parse_plain_path() {
        let src = SourceRef::parse("photos/me.jpg").unwrap();
        assert_eq!(src, SourceRef::File(PathBuf::from("photos/me.jpg")));
    }

    #[test]
    fn test_parse_urls() {
        assert_eq!(
            SourceRef::parse("https://cdn.example.com/a.jpg").unwrap(),
            SourceRef::Url("https://cdn.example.com/a.jpg".to_string())
        );
        assert_eq!(
            SourceRef::parse("blob:https://app.example.com/1234").unwrap(),
            SourceRef::Url("blob:https://app.example.com/1234".to_string())
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(SourceRef::parse("   "), Err(DecodeError::InvalidSource(_))));
        assert!(matches!(SourceRef::parse("file://"), Err(DecodeError::InvalidSource(_))));
        assert!(matches!(
            SourceRef::parse("data:image/png;base64,@@@"),
            Err(DecodeError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_describe_hides_payload() {
        let src = SourceRef::parse("data:image/png;base64,YWJj").unwrap();
        assert_eq!(src.describe(), "data URI (image/png, 3 bytes)");
    }
}
