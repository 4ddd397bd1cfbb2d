//! Wire format detection

use std::path::Path;

/// Content types decoded as JRD
pub const JRD_TYPES: &[&str] = &["application/json", "application/xrd+json", "text/json"];
/// Content types decoded as XRD
pub const XRD_TYPES: &[&str] = &["application/xrd+xml", "text/xml"];

/// Wire representation of a Resource Descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Jrd,
    Xrd,
}

impl Format {
    /// Format for a MIME content type; parameters after `;` are ignored
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if JRD_TYPES.contains(&mime.as_str()) {
            Some(Self::Jrd)
        } else if XRD_TYPES.contains(&mime.as_str()) {
            Some(Self::Xrd)
        } else {
            None
        }
    }

    /// Format for a file name, by extension
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" | "jrd" => Some(Self::Jrd),
            "xml" | "xrd" => Some(Self::Xrd),
            _ => None,
        }
    }

    /// Preferred content type when serving this format
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Jrd => "application/xrd+json",
            Self::Xrd => "application/xrd+xml",
        }
    }
}
