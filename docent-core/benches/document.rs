use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docent_core::Document;

const SAMPLE_JSON: &str = r#"{
    "content": "Sample content for deserialization.",
    "id": "doc_deser_456",
    "name": "Deserialized Benchmark Doc",
    "meta_data": {"source": "benchmark", "status": "active"},
    "reranking_score": 0.88,
    "usage": {"tokens": 50}
}"#;

fn bench_document(c: &mut Criterion) {
    c.bench_function("document_create", |b| {
        b.iter(|| {
            Document::new(black_box("This is benchmark content."))
                .with_id("doc_benchmark_123")
                .with_name("Benchmark Document")
                .with_reranking_score(0.95)
        })
    });

    let doc = Document::from_json(SAMPLE_JSON).unwrap();
    c.bench_function("document_to_json", |b| b.iter(|| black_box(&doc).to_json()));

    let encoded = doc.to_json().unwrap();
    c.bench_function("document_from_json", |b| {
        b.iter(|| Document::from_json(black_box(&encoded)))
    });

    c.bench_function("document_meta_data_json", |b| {
        b.iter(|| {
            let mut doc = Document::new("meta");
            doc.set_meta_data_from_json(black_box(r#"{"key1":"value1","key2":42}"#))
                .unwrap();
            doc.get_meta_data_as_json()
        })
    });
}

criterion_group!(benches, bench_document);
criterion_main!(benches);
