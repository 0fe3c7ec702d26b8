//! Pipeline benchmark: vectorizer fit/transform and full training.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sqli_detector::config::{FeaturesConfig, ModelConfig};
use sqli_detector::dataset::TrainingCorpus;
use sqli_detector::detector::Detector;
use sqli_detector::features::TfidfVectorizer;

fn synthetic_corpus(n: usize) -> TrainingCorpus {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                (format!("SELECT name_{} FROM products WHERE price > {}", i % 23, i), false)
            } else {
                (format!("admin' UNION SELECT {} , version() -- {}", i % 7, i), true)
            }
        })
        .collect()
}

fn bench_vectorizer(c: &mut Criterion) {
    let corpus = synthetic_corpus(1_000);
    let config = FeaturesConfig::default();

    c.bench_function("tfidf_fit_1000_docs", |b| {
        b.iter(|| TfidfVectorizer::fit(black_box(corpus.texts()), &config).unwrap())
    });

    let vectorizer = TfidfVectorizer::fit(corpus.texts(), &config).unwrap();
    c.bench_function("tfidf_transform", |b| {
        b.iter(|| vectorizer.transform(black_box("SELECT name_3 FROM products WHERE price > 10")))
    });
}

fn bench_training(c: &mut Criterion) {
    let mut g = c.benchmark_group("detector_fit");
    g.sample_size(10);
    for n in [200, 1_000] {
        let corpus = synthetic_corpus(n);
        g.bench_function(format!("rows_{}", n).as_str(), |b| {
            b.iter(|| {
                Detector::fit(
                    black_box(&corpus),
                    &FeaturesConfig::default(),
                    &ModelConfig::default(),
                )
                .unwrap()
            })
        });
    }
    g.finish();
}

criterion_group!(benches, bench_vectorizer, bench_training);
criterion_main!(benches);
