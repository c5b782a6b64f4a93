//! Benchmarks for the objective pipeline
//!
//! Run with: cargo bench

use compass::chart::{RenderFrame, SnapshotFactory, ViewSynchronizer};
use compass::csv_codec::{export_csv, import_csv, NameCommaPolicy};
use compass::objective::{load_from_form, FormSnapshot, Objective};
use compass::persistence::{JsonFileRepository, MemoryRepository};
use compass::projection::Projection;
use compass::session::{Session, SessionOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tempfile::tempdir;

fn create_test_objectives(count: usize) -> Vec<Objective> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count.max(1) as f64;
            Objective::new(format!("Objective {}", i), t, 1.0 - t, t * t, (t * 3.0) % 1.0)
        })
        .collect()
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [10, 100, 1000] {
        let objectives = create_test_objectives(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("frame_{}", size), |b| {
            b.iter(|| RenderFrame::compute(black_box(&objectives), Projection::Blended))
        });

        group.bench_function(format!("synchronizer_{}", size), |b| {
            let mut view = ViewSynchronizer::new(SnapshotFactory::default(), Projection::Blended);
            b.iter(|| view.render(black_box(&objectives)))
        });
    }

    group.finish();
}

fn bench_form(c: &mut Criterion) {
    let mut group = c.benchmark_group("form");

    for size in [10, 100, 1000] {
        let snapshot = FormSnapshot::from_objectives(&create_test_objectives(size));

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("load_from_form_{}", size), |b| {
            b.iter(|| load_from_form(black_box(&snapshot)))
        });
    }

    group.finish();
}

fn bench_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv");

    for size in [100, 1000] {
        let objectives = create_test_objectives(size);
        let text = export_csv(&objectives, NameCommaPolicy::Strip).unwrap();

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("export_{}", size), |b| {
            b.iter(|| export_csv(black_box(&objectives), NameCommaPolicy::Strip).unwrap())
        });

        group.bench_function(format!("import_{}", size), |b| {
            b.iter(|| import_csv(black_box(&text)))
        });
    }

    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");

    group.bench_function("add_objective_memory", |b| {
        let mut session = Session::open(
            MemoryRepository::new(),
            SnapshotFactory::default(),
            SessionOptions::default(),
        );
        let text = export_csv(&create_test_objectives(50), NameCommaPolicy::Strip).unwrap();
        session.import_csv(&text);

        b.iter(|| {
            session.add_objective();
            session.remove_at(50).unwrap()
        })
    });

    group.bench_function("apply_form_file", |b| {
        let dir = tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path(), "bench.json").unwrap();
        let mut session = Session::open(repo, SnapshotFactory::default(), SessionOptions::default());
        let snapshot = FormSnapshot::from_objectives(&create_test_objectives(50));

        b.iter(|| session.apply_form(black_box(&snapshot)))
    });

    group.finish();
}

criterion_group!(benches, bench_render, bench_form, bench_csv, bench_session);
criterion_main!(benches);
