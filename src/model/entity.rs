//! Leaf entities of a Resource Descriptor
//!
//! [`Property`], [`Title`] and [`Attribute`] compare, order and hash by
//! their string projection (their `Display` output), so two entities that
//! print the same are the same entity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

/// Typed, optionally valued metadata tag
///
/// A property with `value: None` is "present but nil", which is not the
/// same thing as `Some(String::new())`.
#[derive(Clone, Debug)]
pub struct Property {
    pub type_: String,
    pub value: Option<String>,
}

impl Property {
    /// Property with no value
    pub fn new(type_: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            value: None,
        }
    }

    /// Property carrying `value`; an empty string is a value, not nil
    pub fn with_value(type_: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            value: Some(value.into()),
        }
    }

    /// `true` when the value is absent (`xsi:nil` in XRD, `null` in JRD)
    pub fn is_nil(&self) -> bool {
        self.value.is_none()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}:{}", self.type_, value),
            None => f.write_str(&self.type_),
        }
    }
}

/// Human readable label, optionally language tagged
#[derive(Clone, Debug)]
pub struct Title {
    pub value: String,
    pub lang: Option<String>,
}

impl Title {
    /// Title with no language tag
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lang: None,
        }
    }

    /// Title tagged with `lang` (`xml:lang` in XRD)
    pub fn with_lang(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lang: Some(lang.into()),
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lang {
            Some(lang) => write!(f, "{}:{}", lang, self.value),
            None => f.write_str(&self.value),
        }
    }
}

/// Free-form attribute on the document root, including `xmlns` declarations
#[derive(Clone, Debug)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    /// Root attribute of an XRD document
    ///
    /// Names are kept verbatim, including any prefix such as `xmlns:`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Namespace prefix declared by this attribute
    ///
    /// `Some("")` for a default namespace declaration (`xmlns`), `None` when
    /// the attribute is not a declaration at all.
    pub fn namespace_prefix(&self) -> Option<&str> {
        if self.name == "xmlns" {
            Some("")
        } else {
            self.name.strip_prefix("xmlns:")
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

macro_rules! projection_identity {
    ($($ty:ty),+) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.to_string() == other.to_string()
                }
            }

            impl Eq for $ty {}

            impl PartialOrd for $ty {
                fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }

            impl Ord for $ty {
                fn cmp(&self, other: &Self) -> Ordering {
                    self.to_string().cmp(&other.to_string())
                }
            }

            impl Hash for $ty {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    self.to_string().hash(state);
                }
            }
        )+
    };
}

projection_identity!(Property, Title, Attribute);

/// Content of an extension element
#[derive(Clone, Debug, PartialEq)]
pub enum ElementValue {
    /// Character data
    Text(String),
    /// Child elements, as read from XML
    Nested(Vec<Element>),
    /// Non-string value carried through from JSON
    Json(serde_json::Value),
}

impl Default for ElementValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for ElementValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ElementValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Child element outside the XRD vocabulary
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub value: ElementValue,
    pub attrs: IndexMap<String, String>,
}

impl Element {
    /// Extension element with no attributes
    pub fn new(name: impl Into<String>, value: impl Into<ElementValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            attrs: IndexMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Text content, if this element holds text
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            ElementValue::Text(text) => Some(text),
            _ => None,
        }
    }
}
