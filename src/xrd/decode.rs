use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::model::{Attribute, Element, ElementValue, Link, Property, Rd, Title};
use crate::xrd::parser::Parser;
use crate::xrd::tree::{local_name, Node};

pub(crate) fn decode(input: &[u8], config: &Config) -> Result<Rd> {
    config.check_size(input.len())?;
    let doc = Parser::new(input)
        .with_max_depth(config.max_depth)
        .parse()?;
    from_root(doc.root)
}

fn from_root(root: Node) -> Result<Rd> {
    if root.local_name() != "XRD" {
        return Err(Error::new(ErrorKind::UnexpectedRoot {
            found: root.name.clone(),
        }));
    }

    let mut rd = Rd::new();
    for (name, value) in &root.attributes {
        if name == "xml:id" {
            rd.xml_id = Some(value.clone());
        } else {
            rd.attributes.push(Attribute::new(name.as_str(), value.as_str()))?;
        }
    }

    for child in root.into_nodes() {
        match child.local_name() {
            "Subject" => rd.subject = Some(child.text()),
            "Expires" => rd.set_expires_str(&child.text())?,
            "Alias" => rd.aliases.push(child.text()),
            "Property" => rd.properties.push(property(&child)?)?,
            "Link" => rd.links.push(link(&child)?)?,
            "Signature" => rd.signatures.push(element(child)),
            _ => {
                trace!(name = %child.name, "extension element");
                rd.elements.push(element(child))?;
            }
        }
    }

    debug!(
        properties = rd.properties.len(),
        links = rd.links.len(),
        "decoded XRD"
    );
    Ok(rd)
}

fn property(node: &Node) -> Result<Property> {
    let type_ = node
        .attr("type")
        .ok_or_else(|| Error::unexpected("Property", "a type attribute"))?;
    let text = node.text();
    let value = match nil_marker(node) {
        Some(true) => None,
        Some(false) => Some(text),
        None if text.is_empty() => None,
        None => Some(text),
    };
    Ok(Property {
        type_: type_.to_string(),
        value,
    })
}

/// Value of a prefixed `nil` attribute (`xsi:nil`), if there is one
fn nil_marker(node: &Node) -> Option<bool> {
    node.attributes
        .iter()
        .find(|(name, _)| name.contains(':') && local_name(name) == "nil")
        .map(|(_, value)| matches!(value.trim(), "true" | "1"))
}

fn link(node: &Node) -> Result<Link> {
    let mut link = Link {
        rel: node.attr("rel").map(str::to_string),
        type_: node.attr("type").map(str::to_string),
        href: node.attr("href").map(str::to_string),
        template: node.attr("template").map(str::to_string),
        ..Link::default()
    };

    for child in node.nodes() {
        match child.local_name() {
            "Title" => link.titles.push(Title {
                value: child.text(),
                lang: child.attr("xml:lang").map(str::to_string),
            })?,
            "Property" => link.properties.push(property(child)?)?,
            other => trace!(name = other, "ignoring unknown Link child"),
        }
    }

    Ok(link)
}

fn element(mut node: Node) -> Element {
    let name = std::mem::take(&mut node.name);
    let attrs = std::mem::take(&mut node.attributes);
    let value = if node.has_nodes() {
        ElementValue::Nested(node.into_nodes().map(element).collect())
    } else {
        ElementValue::Text(node.text())
    };
    Element { name, value, attrs }
}
