use criterion::{black_box, criterion_group, criterion_main, Criterion};

use binsight::{Classifier, ClassifierConfig, Corpus};

fn setup_benchmark_classifier() -> Classifier {
    Classifier::builder()
        .with_corpus(Corpus::builtin())
        .build()
        .unwrap()
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("Training");
    group.sample_size(20);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("builtin_corpus", |b| {
        b.iter(|| {
            Classifier::builder()
                .with_corpus(black_box(Corpus::builtin()))
                .build()
                .unwrap()
        })
    });

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let classifier = setup_benchmark_classifier();
    let mut group = c.benchmark_group("Classification");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // In-corpus item
    group.bench_function("known_item", |b| {
        b.iter(|| classifier.classify(black_box("banana peel")).unwrap())
    });

    // Partial overlap with the corpus
    group.bench_function("paraphrase", |b| {
        b.iter(|| classifier.classify(black_box("used tea leaves")).unwrap())
    });

    // No vocabulary overlap; exercises the bias-only fallback path
    group.bench_function("unknown_item", |b| {
        b.iter(|| classifier.classify(black_box("xyzzy unknown junk")).unwrap())
    });

    group.finish();
}

fn bench_neighbor_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("Neighbors");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    for &k in &[1usize, 5, 10] {
        let config = ClassifierConfig {
            neighbor_count: k,
            ..ClassifierConfig::default()
        };
        let classifier = Classifier::builder()
            .with_corpus(Corpus::builtin())
            .with_config(config)
            .build()
            .unwrap();

        group.bench_function(format!("k_{}", k), |b| {
            b.iter(|| classifier.classify(black_box("plastic bottle")).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_training,
    bench_classification,
    bench_neighbor_counts
);
criterion_main!(benches);
