//! JRD: the JSON form of a Resource Descriptor
//!
//! ```
//! # fn main() -> rd::Result<()> {
//! let rd = rd::jrd::decode(r#"{"subject":"acct:bob@example.com","aliases":["http://example.com/~bob/"]}"#)?;
//! assert_eq!(rd.subject.as_deref(), Some("acct:bob@example.com"));
//! assert_eq!(rd::jrd::encode(&rd)?, r#"{"aliases":["http://example.com/~bob/"],"subject":"acct:bob@example.com"}"#);
//! # Ok(())
//! # }
//! ```

mod decode;
mod encode;

use tracing::instrument;

use crate::config::Config;
use crate::error::Result;
use crate::model::Rd;

/// Decode a JRD document
pub fn decode(input: impl AsRef<[u8]>) -> Result<Rd> {
    decode_with_config(input, &Config::default())
}

/// Decode a JRD document with custom limits
#[instrument(level = "debug", skip_all, fields(len = input.as_ref().len()))]
pub fn decode_with_config(input: impl AsRef<[u8]>, config: &Config) -> Result<Rd> {
    decode::decode(input.as_ref(), config)
}

/// Encode as a JRD document
pub fn encode(rd: &Rd) -> Result<String> {
    encode_with_config(rd, &Config::default())
}

/// Encode as a JRD document, indented when `config.pretty` is set
#[instrument(level = "debug", skip_all)]
pub fn encode_with_config(rd: &Rd, config: &Config) -> Result<String> {
    encode::encode(rd, config)
}

/// Encode as a JSON value, before serialization
pub fn to_value(rd: &Rd) -> Result<serde_json::Value> {
    encode::to_value(rd)
}
