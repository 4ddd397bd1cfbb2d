//! Minimal XML tree the XRD codec reads from and writes to

use indexmap::IndexMap;

/// XML document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Node,
}

/// XML element
///
/// Names are kept exactly as written, prefix included; nothing here
/// resolves namespaces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Node(Node),
    Text(String),
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Insert or replace an attribute
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Set the attribute only when a value is present
    pub fn set_opt_attr(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.set_attr(name, value);
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn push_node(&mut self, node: Self) {
        self.children.push(Content::Node(node));
    }

    /// Append text, skipping empty strings so `<a/>` stays self-closing
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.children.push(Content::Text(text));
        }
    }

    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Concatenated character data of direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Content::Text(text) => Some(text.as_str()),
                Content::Node(_) => None,
            })
            .collect()
    }

    /// Child elements, in document order
    pub fn nodes(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Content::Node(node) => Some(node),
            Content::Text(_) => None,
        })
    }

    pub fn into_nodes(self) -> impl Iterator<Item = Self> {
        self.children.into_iter().filter_map(|child| match child {
            Content::Node(node) => Some(node),
            Content::Text(_) => None,
        })
    }

    pub fn has_nodes(&self) -> bool {
        self.nodes().next().is_some()
    }
}

/// Part of a qualified name after the prefix
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Whether `name` can be written as an element or attribute name
///
/// Uses the same byte classes the parser accepts, so anything this passes
/// reads back.
pub fn is_valid_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next().is_some_and(is_name_start) && bytes.all(is_name_char)
}

pub(crate) fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

pub(crate) fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}
