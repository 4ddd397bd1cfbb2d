#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rd::{jrd, xrd, Link, Rd};

fn large_document() -> Rd {
    let mut doc = Rd::with_subject("acct:bob@example.com");
    doc.set_expires_str("2012-10-12T20:56:11Z").unwrap();
    for i in 0..200 {
        doc.aliases.push(format!("http://www.example.com/~bob/{i}"));
        doc.properties
            .push((format!("http://example.com/ns/{i}"), format!("value {i}")))
            .unwrap();

        let mut link = Link::new()
            .with_rel(format!("http://example.com/rel/{}", i % 10))
            .with_type("text/html")
            .with_href(format!("http://example.com/{i}"));
        link.titles.push(("Title", "en")).unwrap();
        link.properties.push("http://example.com/ns/nil").unwrap();
        doc.links.push(link).unwrap();
    }
    doc
}

fn bench_jrd(c: &mut Criterion) {
    let input = include_str!("../tests/fixtures/jrd-wf02-4.1-lrdd.json");
    c.bench_function("decode_jrd", |b| {
        b.iter(|| jrd::decode(black_box(input)).unwrap())
    });

    let large = jrd::encode(&large_document()).unwrap();
    c.bench_function("decode_jrd_large", |b| {
        b.iter(|| jrd::decode(black_box(&large)).unwrap())
    });

    let doc = large_document();
    c.bench_function("encode_jrd_large", |b| {
        b.iter(|| jrd::encode(black_box(&doc)).unwrap())
    });
}

fn bench_xrd(c: &mut Criterion) {
    let input = include_str!("../tests/fixtures/xrd-rfc6415-A.xml");
    c.bench_function("decode_xrd", |b| {
        b.iter(|| xrd::decode(black_box(input)).unwrap())
    });

    let large = xrd::encode(&large_document()).unwrap();
    c.bench_function("decode_xrd_large", |b| {
        b.iter(|| xrd::decode(black_box(&large)).unwrap())
    });

    let doc = large_document();
    c.bench_function("encode_xrd_large", |b| {
        b.iter(|| xrd::encode(black_box(&doc)).unwrap())
    });
}

criterion_group!(benches, bench_jrd, bench_xrd);
criterion_main!(benches);
