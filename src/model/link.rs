//! Typed relation from the subject to another resource

use crate::model::list::{PropertyList, TitleList};

/// Link with optional relation, media type, target and template
///
/// `href` and `template` are independent; source documents may carry both.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Link {
    pub rel: Option<String>,
    pub type_: Option<String>,
    pub href: Option<String>,
    pub template: Option<String>,
    pub titles: TitleList,
    pub properties: PropertyList,
}

impl Link {
    /// Link with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }

    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// URI template, e.g. `https://example.com/lrdd?uri={uri}`
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Title without a language tag, falling back to the first title
    pub fn default_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .find(|t| t.lang.is_none())
            .or_else(|| self.titles.first())
            .map(|t| t.value.as_str())
    }
}
