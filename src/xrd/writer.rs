//! XML serializer for [`Document`] trees

use crate::xrd::tree::{Content, Document, Node};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";

/// Serialize a document with an XML declaration
///
/// With `pretty`, elements holding only child elements are indented one
/// level per depth. Elements with text are written inline so their
/// character data is untouched.
pub fn write_document(doc: &Document, pretty: bool) -> String {
    let mut output = String::from(DECLARATION);
    if pretty {
        output.push('\n');
    }
    write_node(&doc.root, &mut output, pretty, 0);
    if pretty {
        output.push('\n');
    }
    output
}

fn write_node(node: &Node, output: &mut String, pretty: bool, depth: usize) {
    output.push('<');
    output.push_str(&node.name);

    for (key, value) in &node.attributes {
        output.push(' ');
        output.push_str(key);
        output.push_str("=\"");
        output.push_str(&escape_xml(value));
        output.push('"');
    }

    if node.children.is_empty() {
        output.push_str("/>");
        return;
    }

    output.push('>');
    let indent = pretty
        && node
            .children
            .iter()
            .all(|child| matches!(child, Content::Node(_)));

    for child in &node.children {
        if indent {
            output.push('\n');
            output.push_str(&INDENT.repeat(depth + 1));
        }
        match child {
            Content::Node(child) => write_node(child, output, pretty, depth + 1),
            Content::Text(text) => output.push_str(&escape_xml(text)),
        }
    }

    if indent {
        output.push('\n');
        output.push_str(&INDENT.repeat(depth));
    }
    output.push_str("</");
    output.push_str(&node.name);
    output.push('>');
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
