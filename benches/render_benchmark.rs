//! Benchmarks for brochure projection and export.
//!
//! Run with: cargo bench

use brochure::{Document, ExportFormat, ExportOptions, RenderOptions, Section};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// The sample brochure with `extra` default sections appended.
fn create_test_document(extra: usize) -> Document {
    let mut doc = Document::sample();
    for i in 0..extra {
        doc = doc.with_section(Section::new(format!("extra-{}", i)));
    }
    doc
}

/// Benchmark layout projection at various sizes.
fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    for extra in [0, 10, 50].iter() {
        let doc = create_test_document(*extra);
        let options = RenderOptions::default();

        group.bench_function(format!("{}_sections", doc.section_count()), |b| {
            b.iter(|| brochure::render::project_document(black_box(&doc), &options));
        });
    }

    group.finish();
}

/// Benchmark HTML preview output.
fn bench_html(c: &mut Criterion) {
    let doc = Document::sample();
    let options = RenderOptions::new().with_standalone_html(true);

    c.bench_function("html_preview", |b| {
        b.iter(|| brochure::to_html(black_box(&doc), &options));
    });
}

/// Benchmark the export pipeline per format at low resolution.
fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(10);

    let doc = Document::sample();
    for format in [ExportFormat::Pdf, ExportFormat::Png, ExportFormat::Jpg] {
        let options = ExportOptions::new().with_format(format).with_resolution(72);

        group.bench_function(format.extension(), |b| {
            b.iter(|| brochure::export(black_box(&doc), &options).is_ok());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_projection, bench_html, bench_export);
criterion_main!(benches);
