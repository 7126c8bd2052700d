use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use freehand_label::{Point, RenderOptions, compute_label_anchor, render_with_options};
use std::f64::consts::TAU;
use std::hint::black_box;

/// Star polygon with `spikes` points; concave, so both scans see many spans.
fn star(spikes: usize, outer: f64, inner: f64) -> Vec<Point> {
    (0..spikes * 2)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = (i as f64 + 0.25) * TAU / (spikes * 2) as f64;
            Point::new(360.0 + radius * angle.cos(), 240.0 + radius * angle.sin())
        })
        .collect()
}

/// A freehand-looking closed loop sampled every few pixels.
fn sketch_script(samples: usize) -> String {
    let mut out = String::from("text Bench\n");
    for i in 0..samples {
        let angle = i as f64 * TAU / samples as f64;
        let wobble = 1.0 + 0.2 * (angle * 5.0).sin();
        let x = 360.0 + 200.0 * wobble * angle.cos();
        let y = 240.0 + 150.0 * wobble * angle.sin();
        let cmd = if i == 0 { "down" } else { "move" };
        out.push_str(&format!("{cmd} {x:.2} {y:.2}\n"));
    }
    out.push_str("up\n");
    out
}

fn bench_anchor(c: &mut Criterion) {
    let mut group = c.benchmark_group("anchor");
    for spikes in [5usize, 50, 500] {
        let polygon = star(spikes, 200.0, 80.0);
        group.bench_with_input(BenchmarkId::new("star", spikes), &polygon, |b, polygon| {
            b.iter(|| compute_label_anchor(black_box(polygon)))
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    for samples in [64usize, 1024] {
        let script = sketch_script(samples);
        group.bench_with_input(BenchmarkId::new("sketch", samples), &script, |b, script| {
            b.iter(|| render_with_options(black_box(script), RenderOptions::classic()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_anchor, bench_render);
criterion_main!(benches);
