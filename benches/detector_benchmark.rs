use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ort::session::builder::GraphOptimizationLevel;
use toxdetect::{RuntimeConfig, ToxicityDetector};

fn bench_analysis(c: &mut Criterion) {
    let detector = match ToxicityDetector::new() {
        Ok(detector) => detector,
        Err(e) => {
            eprintln!("skipping analysis benchmarks: {e}");
            return;
        }
    };

    let mut group = c.benchmark_group("Analysis");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Short text (< 10 tokens)
    group.bench_function("short_text", |b| {
        b.iter(|| detector.analyze(black_box("This is a short text")).unwrap())
    });

    // Medium text (~50 tokens)
    group.bench_function("medium_text", |b| {
        b.iter(|| {
            detector
                .analyze(black_box(
                    "This is a medium length text that should take more time to tokenize \
                     and score due to its increased length and complexity. It contains \
                     multiple sentences with various words and punctuation.",
                ))
                .unwrap()
        })
    });

    // Long text (~200 tokens)
    group.bench_function("long_text", |b| {
        b.iter(|| {
            detector
                .analyze(black_box(
                    "This is a much longer text that contains multiple paragraphs and should \
                     take significantly more time to process. It includes various words, \
                     punctuation marks, and different types of sentences.\n\n\
                     The second paragraph adds more content and complexity to the text, \
                     making it a good test case for scoring performance with longer \
                     documents. We want to ensure the pipeline handles such cases efficiently.\n\n\
                     Finally, this last paragraph helps us understand how the detector scales \
                     with input size and whether it maintains good performance even with \
                     substantial amounts of text that might be encountered in real-world scenarios.",
                ))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_thread_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("ThreadConfigs");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let configs = vec![
        (
            "single_thread",
            RuntimeConfig {
                inter_threads: 1,
                intra_threads: 1,
                optimization_level: GraphOptimizationLevel::Level1,
            },
        ),
        ("default", RuntimeConfig::default()),
        (
            "engine_decides",
            RuntimeConfig {
                inter_threads: 0,
                intra_threads: 0,
                optimization_level: GraphOptimizationLevel::Level3,
            },
        ),
    ];

    for (name, config) in configs {
        let detector = match ToxicityDetector::builder()
            .with_runtime_config(config)
            .build()
        {
            Ok(detector) => detector,
            Err(e) => {
                eprintln!("skipping thread-config benchmarks: {e}");
                return;
            }
        };

        group.bench_function(format!("analyze_{name}"), |b| {
            b.iter(|| {
                detector
                    .analyze(black_box(
                        "This is a test sentence that needs to be scored for toxicity.",
                    ))
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analysis, bench_thread_configs);
criterion_main!(benches);
