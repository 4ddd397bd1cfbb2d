use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::datetime;
use crate::error::{Error, ErrorKind, Result};
use crate::model::{Attribute, Element, ElementValue, Link, Property, Rd};
use crate::xrd::tree::{is_valid_name, Content, Document, Node};
use crate::xrd::writer;

/// Default namespace of an XRD document
pub const XRD_NAMESPACE: &str = "http://docs.oasis-open.org/ns/xri/xrd-1.0";
/// Namespace of the `nil` marker attribute
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub(crate) fn encode(rd: &Rd, config: &Config) -> Result<String> {
    let doc = to_document(rd)?;
    debug!(pretty = config.pretty, "encoding XRD");
    Ok(writer::write_document(&doc, config.pretty))
}

fn to_document(rd: &Rd) -> Result<Document> {
    let mut root = Node::new("XRD");
    root.set_opt_attr("xml:id", rd.xml_id.as_deref());

    if rd.attributes.by_name("xmlns").next().is_none() {
        root.set_attr("xmlns", XRD_NAMESPACE);
    }
    for attr in &rd.attributes {
        check_name(&attr.name)?;
        if root.attributes.contains_key(&attr.name) {
            return Err(Error::new(ErrorKind::DuplicateAttribute {
                name: attr.name.clone(),
            }));
        }
        root.set_attr(attr.name.as_str(), attr.value.as_str());
    }

    let xsi = xsi_prefix(rd);
    if needs_nil_marker(rd) && !root.attributes.contains_key(&format!("xmlns:{xsi}")) {
        root.set_attr(format!("xmlns:{xsi}"), XSI_NAMESPACE);
    }

    if let Some(subject) = &rd.subject {
        root.push_node(text_node("Subject", subject));
    }
    if let Some(expires) = rd.expires() {
        root.push_node(text_node("Expires", &datetime::format(&expires)?));
    }
    for alias in &rd.aliases {
        root.push_node(text_node("Alias", alias));
    }
    for prop in &rd.properties {
        root.push_node(property(prop, &xsi));
    }
    for link in &rd.links {
        root.push_node(link_node(link, &xsi));
    }
    for signature in &rd.signatures {
        root.push_node(element(signature)?);
    }
    for elem in &rd.elements {
        root.push_node(element(elem)?);
    }

    Ok(Document { root })
}

/// Prefix for `nil` markers
///
/// Reuses a prefix already bound to the XSI namespace. Otherwise `xsi`,
/// or `xsi1`, `xsi2`, ... when `xsi` is bound to something else.
fn xsi_prefix(rd: &Rd) -> String {
    let bound = rd
        .attributes
        .iter()
        .filter(|attr| attr.value == XSI_NAMESPACE)
        .filter_map(Attribute::namespace_prefix)
        .find(|prefix| !prefix.is_empty());
    if let Some(prefix) = bound {
        return prefix.to_string();
    }

    let taken = |prefix: &str| {
        let decl = format!("xmlns:{prefix}");
        let found = rd.attributes.by_name(&decl).next().is_some();
        found
    };
    let mut prefix = String::from("xsi");
    let mut n = 0u32;
    while taken(&prefix) {
        n += 1;
        prefix = format!("xsi{n}");
    }
    prefix
}

fn check_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::InvalidName {
            name: name.to_string(),
        }))
    }
}

fn needs_nil_marker(rd: &Rd) -> bool {
    let marked = |prop: &Property| prop.value.as_deref().map_or(true, str::is_empty);
    rd.properties.iter().any(marked)
        || rd
            .links
            .iter()
            .any(|link| link.properties.iter().any(marked))
}

fn text_node(name: &str, text: &str) -> Node {
    let mut node = Node::new(name);
    node.push_text(text);
    node
}

fn property(prop: &Property, xsi: &str) -> Node {
    let mut node = Node::new("Property");
    node.set_attr("type", prop.type_.as_str());
    match prop.value.as_deref() {
        None => node.set_attr(format!("{xsi}:nil"), "true"),
        // empty text alone would read back as nil
        Some("") => node.set_attr(format!("{xsi}:nil"), "false"),
        Some(value) => node.push_text(value),
    }
    node
}

fn link_node(link: &Link, xsi: &str) -> Node {
    let mut node = Node::new("Link");
    node.set_opt_attr("rel", link.rel.as_deref());
    node.set_opt_attr("type", link.type_.as_deref());
    node.set_opt_attr("href", link.href.as_deref());
    node.set_opt_attr("template", link.template.as_deref());

    for title in &link.titles {
        let mut child = text_node("Title", &title.value);
        child.set_opt_attr("xml:lang", title.lang.as_deref());
        node.push_node(child);
    }
    for prop in &link.properties {
        node.push_node(property(prop, xsi));
    }
    node
}

fn element(elem: &Element) -> Result<Node> {
    check_name(&elem.name)?;
    for name in elem.attrs.keys() {
        check_name(name)?;
    }

    let mut node = Node::new(elem.name.as_str());
    node.attributes = elem.attrs.clone();
    match &elem.value {
        ElementValue::Text(text) => node.push_text(text.as_str()),
        ElementValue::Nested(children) => {
            for child in children {
                node.push_node(element(child)?);
            }
        }
        ElementValue::Json(value) => node.children = json_children(value)?,
    }
    Ok(node)
}

/// Object keys become child elements, array items repeat their element
fn json_children(value: &Value) -> Result<Vec<Content>> {
    let children = match value {
        Value::Object(obj) => {
            let mut children = Vec::new();
            for (key, value) in obj {
                children.extend(json_nodes(key, value)?.into_iter().map(Content::Node));
            }
            children
        }
        Value::Array(arr) => {
            let mut children = Vec::new();
            for item in arr {
                children.extend(json_children(item)?);
            }
            children
        }
        Value::String(text) if text.is_empty() => Vec::new(),
        Value::String(text) => vec![Content::Text(text.clone())],
        Value::Null => Vec::new(),
        other => vec![Content::Text(other.to_string())],
    };
    Ok(children)
}

fn json_nodes(name: &str, value: &Value) -> Result<Vec<Node>> {
    check_name(name)?;
    match value {
        Value::Array(arr) => {
            let mut nodes = Vec::with_capacity(arr.len());
            for item in arr {
                nodes.extend(json_nodes(name, item)?);
            }
            Ok(nodes)
        }
        _ => Ok(vec![Node {
            name: name.to_string(),
            children: json_children(value)?,
            ..Node::default()
        }]),
    }
}
