#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;
use rd::xrd::{XRD_NAMESPACE, XSI_NAMESPACE};
use rd::{jrd, xrd, Attribute, Element, Link, Property, Rd, Title};
use time::OffsetDateTime;

// Printable text without leading or trailing whitespace
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ._:/&<>'\"-]{0,20}[a-zA-Z0-9]"
}

fn uri_strategy() -> impl Strategy<Value = String> {
    "(http|https|acct):[a-z]{1,8}(\\.[a-z]{2,3})?(/[a-z0-9]{0,6}){0,2}"
}

fn expires_strategy() -> impl Strategy<Value = Option<OffsetDateTime>> {
    option::of((0i64..4_102_444_800).prop_map(|secs| {
        OffsetDateTime::from_unix_timestamp(secs).unwrap()
    }))
}

// Empty and whitespace-only values must stay distinct from nil
fn property_value_strategy() -> impl Strategy<Value = Option<String>> {
    option::of(prop_oneof![
        Just(String::new()),
        "[ ]{1,3}",
        text_strategy(),
    ])
}

fn property_strategy() -> impl Strategy<Value = Property> {
    (uri_strategy(), property_value_strategy()).prop_map(|(type_, value)| Property { type_, value })
}

fn title_strategy() -> impl Strategy<Value = Title> {
    (text_strategy(), option::of("[a-z]{2}(-[a-z]{2})?")).prop_map(|(value, lang)| Title { value, lang })
}

fn link_strategy() -> impl Strategy<Value = Link> {
    (
        option::of("[a-z]{1,10}"),
        option::of("(text|image)/[a-z]{1,6}"),
        option::of(uri_strategy()),
        option::of(uri_strategy().prop_map(|u| format!("{u}?q={{uri}}"))),
        vec(title_strategy(), 0..3),
        vec(property_strategy(), 0..3),
    )
        .prop_map(|(rel, type_, href, template, titles, properties)| Link {
            rel,
            type_,
            href,
            template,
            titles: titles.into(),
            properties: properties.into(),
        })
}

fn rd_strategy() -> impl Strategy<Value = Rd> {
    (
        option::of(uri_strategy()),
        expires_strategy(),
        vec(uri_strategy(), 0..3),
        vec(property_strategy(), 0..4),
        vec(link_strategy(), 0..4),
        btree_map("ext[a-z]{1,6}", text_strategy(), 0..3),
    )
        .prop_map(|(subject, expires, aliases, properties, links, elements)| {
            let mut doc = Rd::new();
            doc.subject = subject;
            if let Some(expires) = expires {
                doc.set_expires(expires);
            }
            doc.aliases = aliases;
            doc.properties = properties.into();
            doc.links = links.into();
            doc.elements = elements
                .into_iter()
                .map(|(name, value)| Element::new(name, value))
                .collect::<Vec<_>>()
                .into();
            doc
        })
}

proptest! {
    #[test]
    fn test_jrd_roundtrip(doc in rd_strategy()) {
        let json = jrd::encode(&doc).unwrap();
        let decoded = jrd::decode(&json).unwrap();
        prop_assert_eq!(decoded, doc);
    }

    #[test]
    fn test_xrd_roundtrip(doc in rd_strategy(), xml_id in option::of("[a-z][a-z0-9]{0,8}")) {
        let mut doc = doc;
        doc.xml_id = xml_id;
        doc.attributes.push(Attribute::new("xmlns", XRD_NAMESPACE)).unwrap();
        doc.attributes.push(Attribute::new("xmlns:xsi", XSI_NAMESPACE)).unwrap();

        let xml = xrd::encode(&doc).unwrap();
        let decoded = xrd::decode(&xml).unwrap();
        prop_assert_eq!(decoded, doc);
    }

    #[test]
    fn test_xrd_pretty_roundtrip(doc in rd_strategy()) {
        let config = rd::Config::default().with_pretty(true);
        let xml = xrd::encode_with_config(&doc, &config).unwrap();
        let decoded = xrd::decode(&xml).unwrap();
        prop_assert_eq!(decoded.subject, doc.subject);
        prop_assert_eq!(decoded.properties, doc.properties);
        prop_assert_eq!(decoded.links, doc.links);
        prop_assert_eq!(decoded.elements, doc.elements);
    }

    #[test]
    fn test_by_rel_matches_filter(links in vec(link_strategy(), 0..8), rel in "[a-z]{1,2}") {
        let mut doc = Rd::new();
        doc.links.extend(links.clone()).unwrap();

        let expected: Vec<&Link> = links
            .iter()
            .filter(|l| l.rel.as_deref() == Some(rel.as_str()))
            .collect();
        let found: Vec<&Link> = doc.links.by_rel(&rel).collect();
        prop_assert_eq!(found.len(), expected.len());
        for (a, b) in found.iter().zip(expected) {
            prop_assert_eq!(*a, b);
        }

        // the query restarts from the beginning on every clone
        let query = doc.links.by_rel(&rel);
        prop_assert_eq!(query.clone().count(), query.count());
    }

    #[test]
    fn test_property_coercion_equivalence(type_ in uri_strategy(), value in text_strategy()) {
        let mut doc = Rd::new();
        doc.properties.push((type_.as_str(), value.as_str())).unwrap();
        doc.properties.push(Property::with_value(type_.clone(), value.clone())).unwrap();
        doc.properties.push(type_.as_str()).unwrap();
        doc.properties.push(Property::new(type_.clone())).unwrap();

        prop_assert_eq!(&doc.properties[0], &doc.properties[1]);
        prop_assert_eq!(&doc.properties[2], &doc.properties[3]);
        prop_assert_eq!(doc.properties.by_type(&type_).count(), 4);
    }

    #[test]
    fn test_title_coercion_equivalence(value in text_strategy(), lang in "[a-z]{2}") {
        let mut link = Link::new();
        link.titles.push((value.as_str(), lang.as_str())).unwrap();
        link.titles.push(Title::with_lang(value.clone(), lang.clone())).unwrap();
        link.titles.push(value.as_str()).unwrap();

        prop_assert_eq!(&link.titles[0], &link.titles[1]);
        prop_assert_eq!(link.default_title(), Some(value.as_str()));
    }
}
