use criterion::{criterion_group, criterion_main, Criterion};

use helpers::corpus::TestCorpus;
use pmi_cluster::{cluster_documents, ClusteringOptions};

fn criterion_benchmark(c: &mut Criterion) {
    // Create the corpus
    const NUM_DOCS: usize = 2_000;
    let corpus = TestCorpus::new(1_000, NUM_DOCS, 10., 50, Some(1));
    let documents = corpus.documents_as_str();

    let options = ClusteringOptions {
        batch_size: 100,
        ..ClusteringOptions::default()
    };

    c.bench_function("cluster", |b| {
        b.iter(|| cluster_documents(documents.iter().cloned(), &options))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().significance_level(0.1).sample_size(10);
    targets = criterion_benchmark
}
criterion_main!(benches);
