// Benchmarks for the progress state machine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gallery_core::{ProgressConfig, ProgressTask, Signal};

fn bench_full_run(c: &mut Criterion) {
    let config = ProgressConfig {
        step_size: 0.001,
        tick_interval_ms: 1,
    };
    c.bench_function("progress_full_run", |b| {
        b.iter(|| {
            let mut task = ProgressTask::with_config(&config).unwrap();
            task.start();
            while task.tick().is_none() {}
            black_box(task.observe());
        })
    });
}

fn bench_snapshot_publish(c: &mut Criterion) {
    let signal = Signal::new(ProgressTask::new().observe());
    signal.subscribe(|snapshot| {
        black_box(snapshot.percent());
    });
    c.bench_function("progress_snapshot_publish", |b| {
        b.iter(|| {
            let mut task = ProgressTask::new();
            task.start();
            while task.tick().is_none() {
                signal.set_if_changed(task.observe());
            }
        })
    });
}

criterion_group!(benches, bench_full_run, bench_snapshot_publish);
criterion_main!(benches);
