//! XRD: the XML form of a Resource Descriptor
//!
//! ```
//! # fn main() -> rd::Result<()> {
//! let rd = rd::xrd::decode(r#"<XRD xml:id="42"><Property type="none"/></XRD>"#)?;
//! assert_eq!(rd.xml_id.as_deref(), Some("42"));
//! assert_eq!(rd.properties[0].value, None);
//! # Ok(())
//! # }
//! ```

pub mod cursor;
mod decode;
mod encode;
pub mod parser;
pub mod tree;
pub mod writer;

use tracing::instrument;

use crate::config::Config;
use crate::error::Result;
use crate::model::Rd;

pub use encode::{XRD_NAMESPACE, XSI_NAMESPACE};
pub use parser::Parser;
pub use tree::{Content, Document, Node};

/// Decode an XRD document
pub fn decode(input: impl AsRef<[u8]>) -> Result<Rd> {
    decode_with_config(input, &Config::default())
}

/// Decode an XRD document with custom limits
#[instrument(level = "debug", skip_all, fields(len = input.as_ref().len()))]
pub fn decode_with_config(input: impl AsRef<[u8]>, config: &Config) -> Result<Rd> {
    decode::decode(input.as_ref(), config)
}

/// Encode as an XRD document
pub fn encode(rd: &Rd) -> Result<String> {
    encode_with_config(rd, &Config::default())
}

/// Encode as an XRD document, indented when `config.pretty` is set
#[instrument(level = "debug", skip_all)]
pub fn encode_with_config(rd: &Rd, config: &Config) -> Result<String> {
    encode::encode(rd, config)
}
