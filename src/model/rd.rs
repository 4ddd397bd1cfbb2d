//! The Resource Descriptor root aggregate

use time::OffsetDateTime;

use crate::datetime;
use crate::error::Result;
use crate::model::entity::Element;
use crate::model::link::Link;
use crate::model::list::{AttributeList, ElementList, LinkList, PropertyList};

/// Resource Descriptor
///
/// Owns every entity it holds. `attributes` and `elements` carry whatever
/// the XRD vocabulary does not name: namespace declarations and extension
/// elements.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rd {
    pub xml_id: Option<String>,
    pub subject: Option<String>,
    expires: Option<OffsetDateTime>,
    pub aliases: Vec<String>,
    pub properties: PropertyList,
    pub links: LinkList,
    /// Signature blocks, kept opaque
    pub signatures: Vec<Element>,
    pub attributes: AttributeList,
    pub elements: ElementList,
}

impl Rd {
    /// Empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }

    /// Expiry time, if one is set
    pub fn expires(&self) -> Option<OffsetDateTime> {
        self.expires
    }

    pub fn set_expires(&mut self, expires: OffsetDateTime) {
        self.expires = Some(expires);
    }

    /// Parse and set `expires`; on error the previous value is kept
    pub fn set_expires_str(&mut self, expires: &str) -> Result<()> {
        self.expires = Some(datetime::parse(expires)?);
        Ok(())
    }

    pub fn clear_expires(&mut self) {
        self.expires = None;
    }

    /// First link whose `rel` is any of `rels`
    pub fn find_link(&self, rels: &[&str]) -> Option<&Link> {
        self.links
            .iter()
            .find(|link| link.rel.as_deref().is_some_and(|rel| rels.contains(&rel)))
    }

    /// Encode as JRD
    pub fn to_json(&self) -> Result<String> {
        crate::jrd::encode(self)
    }

    /// Encode as XRD
    pub fn to_xml(&self) -> Result<String> {
        crate::xrd::encode(self)
    }
}
