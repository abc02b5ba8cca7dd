#[macro_use]
extern crate criterion;
extern crate fractalzoom;
extern crate num;
extern crate num_cpus;

use criterion::{black_box, Criterion};
use fractalzoom::{Fractal, FrameRenderer, GridMapper, Palette};
use num::Complex;

fn render_benchmark(c: &mut Criterion) {
    let plane = GridMapper::new(Complex::new(-1.7618998999, -0.02799), 100, 100, 1e-4).unwrap();
    let renderer = FrameRenderer::new(Fractal::BurningShip, Palette::build(60)).unwrap();
    let threads = num_cpus::get();

    c.bench_function("render 201x201 single", |b| {
        b.iter(|| renderer.render(black_box(&plane)))
    });
    c.bench_function("render 201x201 threaded", |b| {
        b.iter(|| {
            renderer
                .render_threaded(black_box(&plane), threads)
                .unwrap()
        })
    });
    c.bench_function("escape time, bounded point", |b| {
        b.iter(|| Fractal::BurningShip.escape_time(black_box(Complex::new(0.0, 0.0)), 1000))
    });
}

criterion_group!(benches, render_benchmark);
criterion_main!(benches);
