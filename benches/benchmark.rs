use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gitdir_scanner::{sanitize_domain, validate_url, Config, GIT_LISTING_TITLE};
use std::time::Duration;

// Fast settings for all benchmarks
fn configure_fast_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_millis(500));
    group.sample_size(20);
}

fn benchmark_config_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("config");
    configure_fast_group(&mut group);

    group.bench_function("creation", |b| {
        b.iter(|| {
            let config = Config::default();
            black_box(config);
        });
    });

    group.finish();
}

fn benchmark_domain_sanitization(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain_sanitization");
    configure_fast_group(&mut group);

    let test_domains = vec![
        "https://example.com",
        "http://sub.example.com:8080",
        "https://example.com/deep/path?q=1",
    ];

    group.bench_function("sanitize", |b| {
        b.iter(|| {
            for domain in &test_domains {
                let name = sanitize_domain(domain);
                black_box(name);
            }
        });
    });

    group.finish();
}

fn benchmark_url_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_validation");
    configure_fast_group(&mut group);

    let test_urls = vec![
        "https://example.com",
        "http://example.com/path",
        "invalid-url",
    ];

    group.bench_function("validate", |b| {
        b.iter(|| {
            for url in &test_urls {
                let result = validate_url(url);
                let _ = black_box(result);
            }
        });
    });

    group.finish();
}

fn benchmark_listing_marker_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing_marker");
    configure_fast_group(&mut group);

    // A plausible directory-listing page with the marker near the top
    let listing_page = format!(
        "<html><head>{}</head><body>{}</body></html>",
        GIT_LISTING_TITLE,
        "<a href=\"objects/\">objects/</a>".repeat(200)
    );
    let decoy_page = format!(
        "<html><head><title>Welcome</title></head><body>{}</body></html>",
        "<p>filler</p>".repeat(200)
    );

    group.bench_function("match", |b| {
        b.iter(|| {
            black_box(listing_page.contains(GIT_LISTING_TITLE));
            black_box(decoy_page.contains(GIT_LISTING_TITLE));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_config_creation,
    benchmark_domain_sanitization,
    benchmark_url_validation,
    benchmark_listing_marker_scan
);
criterion_main!(benches);
