//! Layout benchmarks.

use std::convert::Infallible;

use cellgrid_core::{Dimension, GridData, Insets, LayoutConfig};
use cellgrid_layout::{compute_layout, GridLayout, GridWidget};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Label/field form with an occasional full-width row.
fn form(rows: usize) -> Vec<GridWidget<usize>> {
    let mut widgets = Vec::with_capacity(rows * 2);
    for row in 0..rows {
        if row % 5 == 4 {
            widgets.push(GridWidget::new(widgets.len(), GridData::auto().with_span(2, 3)));
        } else {
            widgets.push(GridWidget::new(widgets.len(), GridData::auto().with_width_hint(120)));
            widgets.push(GridWidget::new(widgets.len(), GridData::auto()));
        }
    }
    widgets
}

fn measure(id: &usize, _: &GridData) -> Result<Dimension, Infallible> {
    Ok(Dimension::new(80 + (*id % 7) as i32 * 10, 20))
}

fn compute_small(c: &mut Criterion) {
    let widgets = form(10);
    let config = LayoutConfig::default().with_gap(5).with_row_height(25);
    c.bench_function("compute_small", |b| {
        b.iter(|| {
            compute_layout(
                black_box(&widgets),
                &config,
                None,
                Dimension::new(800, 600),
                &Insets::uniform(4),
                &mut measure,
            )
        })
    });
}

fn compute_large(c: &mut Criterion) {
    let widgets = form(500);
    let config = LayoutConfig::default().with_gap(5).with_row_height(25).with_column_count(4);
    c.bench_function("compute_large", |b| {
        b.iter(|| {
            compute_layout(
                black_box(&widgets),
                &config,
                None,
                Dimension::new(1600, 20_000),
                &Insets::uniform(4),
                &mut measure,
            )
        })
    });
}

fn cached_relayout(c: &mut Criterion) {
    let widgets = form(500);
    let mut layout = GridLayout::new(LayoutConfig::default().with_gap(5).with_row_height(25));
    let _ = layout.validate(&widgets, None, &mut measure);
    c.bench_function("cached_relayout", |b| {
        b.iter(|| layout.layout(black_box(Dimension::new(1200, 20_000)), &Insets::ZERO))
    });
}

criterion_group!(benches, compute_small, compute_large, cached_relayout);
criterion_main!(benches);
