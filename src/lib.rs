//! rd: Resource Descriptor documents in XRD and JRD form
//!
//! This crate provides:
//! - The Resource Descriptor data model used by WebFinger and host-meta
//! - A JSON codec (JRD) and an XML codec (XRD) over that model
//! - Content-type based dispatch between the two
//!
//! # Examples
//! ```
//! # fn main() -> rd::Result<()> {
//! let json = r#"{"subject":"acct:bob@example.com","links":[{"rel":"avatar","href":"http://example.com/bob.jpg"}]}"#;
//! let rd = rd::decode(json, "application/xrd+json; charset=utf-8")?.expect("supported type");
//!
//! let avatar = rd.links.by_rel("avatar").next().and_then(|l| l.href.as_deref());
//! assert_eq!(avatar, Some("http://example.com/bob.jpg"));
//!
//! let xml = rd.to_xml()?;
//! assert!(xml.contains("<Subject>acct:bob@example.com</Subject>"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use tracing::{debug, instrument, warn};

pub mod config;
pub mod datetime;
pub mod error;
pub mod format;
pub mod jrd;
pub mod model;
pub mod xrd;

pub use config::Config;
pub use error::{Error, ErrorKind, Pos, Result, Span};
pub use format::{Format, JRD_TYPES, XRD_TYPES};
pub use model::{
    Attribute, AttributeList, Element, ElementList, ElementValue, Item, Link, LinkList, Literal,
    Property, PropertyList, Rd, Title, TitleList, TypedList,
};

/// Decode a document according to its content type
///
/// Returns `Ok(None)` when the content type is neither a JRD nor an XRD
/// type; nothing is guessed from the content itself.
pub fn decode(content: impl AsRef<[u8]>, content_type: &str) -> Result<Option<Rd>> {
    decode_with_config(content, content_type, &Config::default())
}

/// [`decode`] with custom limits
#[instrument(level = "debug", skip(content, config))]
pub fn decode_with_config(
    content: impl AsRef<[u8]>,
    content_type: &str,
    config: &Config,
) -> Result<Option<Rd>> {
    match Format::from_content_type(content_type) {
        Some(Format::Jrd) => {
            debug!("loading JRD");
            jrd::decode_with_config(content, config).map(Some)
        }
        Some(Format::Xrd) => {
            debug!("loading XRD");
            xrd::decode_with_config(content, config).map(Some)
        }
        None => {
            warn!("unsupported content type");
            Ok(None)
        }
    }
}

/// Encode a document in the given format
pub fn encode(rd: &Rd, format: Format) -> Result<String> {
    encode_with_config(rd, format, &Config::default())
}

/// [`encode`] with custom formatting
pub fn encode_with_config(rd: &Rd, format: Format, config: &Config) -> Result<String> {
    match format {
        Format::Jrd => jrd::encode_with_config(rd, config),
        Format::Xrd => xrd::encode_with_config(rd, config),
    }
}
