use criterion::{black_box, criterion_group, criterion_main, Criterion};

use treemark::{normalize, tree_to_xml, xml_to_tree};

const XML_INPUT: &str =
    "<order id=\"42\"><customer>test</customer><item>1</item><item>2</item></order>";
const NS_INPUT: &str = concat!(
    r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
    "<soap:Body><m:Price xmlns:m=\"urn:m\">34.5</m:Price></soap:Body></soap:Envelope>"
);

fn bench_xml_to_tree(c: &mut Criterion) {
    c.bench_function("xml_to_tree", |b| {
        b.iter(|| xml_to_tree(black_box(XML_INPUT)))
    });
}

fn bench_tree_to_xml(c: &mut Criterion) {
    let tree = match xml_to_tree(XML_INPUT) {
        Ok(tree) => tree,
        Err(_) => return,
    };
    c.bench_function("tree_to_xml", |b| {
        b.iter(|| tree_to_xml(None, black_box(&tree)))
    });
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_namespaces", |b| {
        b.iter(|| normalize(black_box(NS_INPUT)))
    });
}

criterion_group!(
    benches,
    bench_xml_to_tree,
    bench_tree_to_xml,
    bench_normalize
);
criterion_main!(benches);
