//! Benchmarks for prosefilter cleaning performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks test the pipeline at various document sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use prosefilter::features::featurize;
use prosefilter::{FilterOptions, Pipeline};

const HEADER: &str = "Osmanlı Mektup Geleneği Üzerine Bir İnceleme";

/// Creates a synthetic thesis-like document with the given number of pages.
fn create_test_document(page_count: usize) -> String {
    let mut pages = Vec::with_capacity(page_count);

    for page in 0..page_count {
        let mut lines = vec![HEADER.to_string()];
        for i in 0..20 {
            lines.push(format!(
                "Bu bölümde {}. sayfanın {}. satırı dönemin toplumsal yapısını ayrıntılı biçimde ele almaktadır (Yılmaz, 2003: {}).",
                page + 1,
                i + 1,
                i + 10
            ));
        }
        if page % 5 == 0 {
            lines.push(format!("Tablo {}. Mektupların yüzyıllara göre dağılımı", page / 5 + 1));
            lines.push("1800 12 45 67".to_string());
            lines.push("1850 23 56 78".to_string());
        }
        lines.push(format!("1 Bkz. Demir, a.g.e., s. {}.", page + 3));
        lines.push(format!("{}", page + 1));
        pages.push(lines.join("\n"));
    }

    pages.join("\n\n\n\n")
}

/// Benchmark the full pipeline at various sizes.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = Pipeline::new(FilterOptions::default()).unwrap();

    for page_count in [1, 10, 50, 200].iter() {
        let raw = create_test_document(*page_count);
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_with_input(BenchmarkId::new("pages", page_count), &raw, |b, raw| {
            b.iter(|| {
                let _ = pipeline.process(black_box(raw));
            });
        });
    }

    group.finish();
}

/// Benchmark line featurization alone.
fn bench_featurize(c: &mut Criterion) {
    let mut group = c.benchmark_group("featurize");

    for page_count in [10, 200].iter() {
        let raw = create_test_document(*page_count);
        let lines: Vec<&str> = raw.lines().filter(|l| !l.trim().is_empty()).collect();

        group.throughput(Throughput::Elements(lines.len() as u64));
        group.bench_with_input(BenchmarkId::new("pages", page_count), &lines, |b, lines| {
            b.iter(|| featurize(black_box(lines.as_slice())));
        });
    }

    group.finish();
}

/// Benchmark preparation: normalization, page inference and section discarding.
fn bench_prepare(c: &mut Criterion) {
    let pipeline = Pipeline::new(FilterOptions::default()).unwrap();
    let raw = create_test_document(50);

    c.bench_function("prepare_50_pages", |b| {
        b.iter(|| pipeline.prepare(black_box(&raw)));
    });
}

criterion_group!(benches, bench_pipeline, bench_featurize, bench_prepare);
criterion_main!(benches);
