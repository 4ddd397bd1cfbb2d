use serde_json::Value;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Attribute, Element, ElementValue, Link, Property, PropertyList, Rd, Title, TitleList};

pub(crate) fn decode(input: &[u8], config: &Config) -> Result<Rd> {
    config.check_size(input.len())?;
    let doc: Value = serde_json::from_slice(input)?;
    let Value::Object(doc) = doc else {
        return Err(Error::unexpected("document", "an object"));
    };

    let mut rd = Rd::new();
    for (key, value) in doc {
        match key.as_str() {
            "expires" => {
                if let Some(expires) = opt_string(&key, value)? {
                    rd.set_expires_str(&expires)?;
                }
            }
            "subject" => rd.subject = opt_string(&key, value)?,
            "aliases" => {
                for alias in array(&key, value)? {
                    rd.aliases.push(string(&key, alias)?);
                }
            }
            "properties" => properties(&key, value, &mut rd.properties)?,
            "titles" => {
                // the root aggregate has no titles; check the shape and move on
                titles(&key, value, &mut TitleList::new())?;
                trace!("discarding top-level titles");
            }
            "links" => {
                for link in array(&key, value)? {
                    rd.links.push(decode_link(link)?)?;
                }
            }
            "namespace" => {
                for (prefix, uri) in entries(&key, value)? {
                    let uri = string(&key, uri)?;
                    rd.attributes.push(Attribute::new(format!("xmlns:{prefix}"), uri))?;
                }
            }
            _ => {
                let name = extension_name(&key);
                trace!(key = %key, name = %name, "extension element");
                rd.elements.push(Element::new(name, element_value(value)))?;
            }
        }
    }

    debug!(
        properties = rd.properties.len(),
        links = rd.links.len(),
        "decoded JRD"
    );
    Ok(rd)
}

fn decode_link(value: Value) -> Result<Link> {
    let Value::Object(obj) = value else {
        return Err(Error::unexpected("links", "an object"));
    };

    let mut link = Link::new();
    for (key, value) in obj {
        match key.as_str() {
            "rel" => link.rel = opt_string(&key, value)?,
            "type" => link.type_ = opt_string(&key, value)?,
            "href" => link.href = opt_string(&key, value)?,
            "template" => link.template = opt_string(&key, value)?,
            "titles" => titles(&key, value, &mut link.titles)?,
            "properties" => properties(&key, value, &mut link.properties)?,
            _ => trace!(key = %key, "ignoring unknown link member"),
        }
    }
    Ok(link)
}

fn properties(field: &str, value: Value, out: &mut PropertyList) -> Result<()> {
    for (type_, value) in entries(field, value)? {
        let value = opt_string(&type_, value)?;
        out.push(Property { type_, value })?;
    }
    Ok(())
}

fn titles(field: &str, value: Value, out: &mut TitleList) -> Result<()> {
    for (lang, value) in entries(field, value)? {
        let value = string(&lang, value)?;
        let lang = (lang != "default").then_some(lang);
        out.push(Title { value, lang })?;
    }
    Ok(())
}

/// Key/value pairs of a list of single-key objects, or of a plain object
fn entries(field: &str, value: Value) -> Result<Vec<(String, Value)>> {
    match value {
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(obj) => out.extend(obj),
                    _ => return Err(Error::unexpected(field, "an array of objects")),
                }
            }
            Ok(out)
        }
        Value::Object(obj) => Ok(obj.into_iter().collect()),
        Value::Null => Ok(Vec::new()),
        _ => Err(Error::unexpected(field, "an array of objects")),
    }
}

fn array(field: &str, value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Null => Ok(Vec::new()),
        _ => Err(Error::unexpected(field, "an array")),
    }
}

fn string(field: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(Error::unexpected(field, "a string")),
    }
}

fn opt_string(field: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        _ => Err(Error::unexpected(field, "a string or null")),
    }
}

/// `ns:name` becomes `ns:Name`, matching the capitalized XRD element style
fn extension_name(key: &str) -> String {
    match key.split_once(':') {
        Some((ns, name)) => format!("{ns}:{}", capitalize(name)),
        None => key.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn element_value(value: Value) -> ElementValue {
    match value {
        Value::String(text) => ElementValue::Text(text),
        other => ElementValue::Json(other),
    }
}
