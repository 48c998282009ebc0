use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lumendex::{BatchOptions, Config, Database, Document, InsertConfig};
use rand::Rng;
use serde_json::json;

/// Helper to create test documents
fn create_test_document(id: u64, content_size: usize) -> Document {
    let mut rng = rand::thread_rng();
    let content: String = (0..content_size)
        .map(|_| {
            let words = ["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"];
            words[rng.gen_range(0..words.len())]
        })
        .collect::<Vec<_>>()
        .join(" ");

    Document::new()
        .with_field("title", format!("Document {}", id))
        .with_field("content", content)
        .with_field("category", format!("category_{}", id % 10))
        .with_field("score", rng.gen_range(0.0f64..100.0))
        .with_field("unindexed", "extra payload")
}

fn create_database() -> Database {
    let schema = json!({
        "title": "string",
        "content": "string",
        "category": "string",
        "score": "number",
    });
    Database::create_from_json(&schema, Config::default()).unwrap()
}

/// Benchmark single document insertion
fn bench_single_insert(c: &mut Criterion) {
    let mut db = create_database();
    let config = InsertConfig::default();

    c.bench_function("single_document_insert", |b| {
        let mut id = 0;
        b.iter(|| {
            let doc = create_test_document(id, 100);
            black_box(db.insert(doc, &config).unwrap());
            id += 1;
        });
    });
}

/// Benchmark batch insertion with different yield cadences
fn bench_batch_insert(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let mut group = c.benchmark_group("batch_insert");

    for batch_size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            batch_size,
            |b, &batch_size| {
                let config = InsertConfig::default();
                let options = BatchOptions::new(batch_size).unwrap();

                b.iter_batched(
                    || {
                        let docs: Vec<Document> =
                            (0..1000).map(|id| create_test_document(id, 50)).collect();
                        (create_database(), docs)
                    },
                    |(mut db, docs)| {
                        runtime.block_on(async {
                            black_box(db.insert_batch(docs, &config, Some(options)).await.unwrap());
                        });
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark term lookup on a populated index
fn bench_lookup(c: &mut Criterion) {
    let mut db = create_database();
    let config = InsertConfig::default();
    for id in 0..10_000 {
        db.insert(create_test_document(id, 100), &config).unwrap();
    }

    let mut group = c.benchmark_group("lookup");
    for query in ["fox", "quick brown", "lazy dog jumps"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), query, |b, query| {
            b.iter(|| black_box(db.lookup("content", query).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_insert, bench_batch_insert, bench_lookup);
criterion_main!(benches);
