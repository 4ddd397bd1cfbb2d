use serde_json::{Map, Value};
use tracing::debug;

use crate::config::Config;
use crate::datetime;
use crate::error::Result;
use crate::model::{Element, ElementValue, Link, Property, Rd, Title};

pub(crate) fn encode(rd: &Rd, config: &Config) -> Result<String> {
    let doc = to_value(rd)?;
    debug!(pretty = config.pretty, "encoding JRD");
    let out = if config.pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    Ok(out)
}

pub(crate) fn to_value(rd: &Rd) -> Result<Value> {
    let mut doc = Map::new();
    for key in ["aliases", "links", "namespace", "properties", "titles"] {
        doc.insert(key.to_string(), Value::Array(Vec::new()));
    }

    let namespaces = rd
        .attributes
        .iter()
        .filter_map(|attr| {
            let prefix = attr.name.strip_prefix("xmlns:")?;
            Some(single(prefix, Value::String(attr.value.clone())))
        })
        .collect();
    doc.insert("namespace".to_string(), Value::Array(namespaces));

    if let Some(expires) = rd.expires() {
        doc.insert("expires".to_string(), Value::String(datetime::format(&expires)?));
    }
    if let Some(subject) = &rd.subject {
        doc.insert("subject".to_string(), Value::String(subject.clone()));
    }

    let aliases = rd.aliases.iter().cloned().map(Value::String).collect();
    doc.insert("aliases".to_string(), Value::Array(aliases));
    doc.insert("properties".to_string(), properties(&rd.properties));
    doc.insert(
        "links".to_string(),
        Value::Array(rd.links.iter().map(link).collect()),
    );

    for elem in &rd.elements {
        doc.insert(elem.name.to_lowercase(), element_value(elem));
    }

    clean(&mut doc);
    Ok(Value::Object(doc))
}

fn link(link: &Link) -> Value {
    let mut obj = Map::new();
    let fields = [
        ("rel", &link.rel),
        ("type", &link.type_),
        ("href", &link.href),
        ("template", &link.template),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            obj.insert(key.to_string(), Value::String(value.clone()));
        }
    }
    obj.insert("properties".to_string(), properties(&link.properties));
    obj.insert(
        "titles".to_string(),
        Value::Array(link.titles.iter().map(title).collect()),
    );
    clean(&mut obj);
    Value::Object(obj)
}

fn properties(props: &[Property]) -> Value {
    Value::Array(
        props
            .iter()
            .map(|prop| {
                let value = prop.value.clone().map_or(Value::Null, Value::String);
                single(&prop.type_, value)
            })
            .collect(),
    )
}

fn title(title: &Title) -> Value {
    let lang = title.lang.as_deref().unwrap_or("default");
    single(lang, Value::String(title.value.clone()))
}

fn single(key: &str, value: Value) -> Value {
    let mut obj = Map::new();
    obj.insert(key.to_string(), value);
    Value::Object(obj)
}

fn element_value(elem: &Element) -> Value {
    match &elem.value {
        ElementValue::Text(text) => Value::String(text.clone()),
        ElementValue::Json(value) => value.clone(),
        ElementValue::Nested(children) => Value::Array(
            children
                .iter()
                .map(|child| single(&child.name, element_value(child)))
                .collect(),
        ),
    }
}

/// Drop every member whose value is empty or falsy
fn clean(obj: &mut Map<String, Value>) {
    obj.retain(|_, value| !is_falsy(value));
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(obj) => obj.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Attribute;
    use serde_json::json;

    #[test]
    fn test_empty_document() -> Result<()> {
        assert_eq!(to_value(&Rd::new())?, json!({}));
        Ok(())
    }

    #[test]
    fn test_property_and_link() -> Result<()> {
        let mut rd = Rd::new();
        rd.properties.push(("mimetype", "text/plain"))?;
        rd.properties.push("none")?;
        rd.links.push(Link::new().with_template("http://google.com/{uri}"))?;

        let doc = to_value(&rd)?;
        assert_eq!(
            doc,
            json!({
                "links": [{"template": "http://google.com/{uri}"}],
                "properties": [{"mimetype": "text/plain"}, {"none": null}],
            })
        );
        Ok(())
    }

    #[test]
    fn test_link_titles_use_default_key() -> Result<()> {
        let mut link = Link::new().with_rel("author");
        link.titles.push("Bob")?;
        link.titles.push(("Robert", "en"))?;
        link.properties.push(("p", "v"))?;
        assert_eq!(
            super::link(&link),
            json!({
                "rel": "author",
                "properties": [{"p": "v"}],
                "titles": [{"default": "Bob"}, {"en": "Robert"}],
            })
        );
        Ok(())
    }

    #[test]
    fn test_namespaces_and_elements() -> Result<()> {
        let mut rd = Rd::with_subject("acct:bob@example.com");
        rd.attributes.push(Attribute::new("xmlns", "urn:default"))?;
        rd.attributes.push(("xmlns:foo", "urn:foo"))?;
        rd.elements.push(Element::new("foo:Bar", "baz"))?;
        rd.elements.push(Element::new("empty", ""))?;

        let doc = to_value(&rd)?;
        assert_eq!(
            doc,
            json!({
                "namespace": [{"foo": "urn:foo"}],
                "subject": "acct:bob@example.com",
                "foo:bar": "baz",
            })
        );
        Ok(())
    }

    #[test]
    fn test_key_order() -> Result<()> {
        let mut rd = Rd::with_subject("s");
        rd.aliases.push("a".to_string());
        rd.set_expires_str("1970-01-01T00:00:00Z")?;
        let json = encode(&rd, &Config::default())?;
        assert_eq!(
            json,
            r#"{"aliases":["a"],"expires":"1970-01-01T00:00:00Z","subject":"s"}"#
        );
        Ok(())
    }

    #[test]
    fn test_falsy_values() {
        assert!(is_falsy(&json!(null)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!("")));
        assert!(is_falsy(&json!({})));
        assert!(!is_falsy(&json!([0])));
        assert!(!is_falsy(&json!(true)));
    }
}
