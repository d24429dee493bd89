//! Text slot benchmark: shaping, texture creation and per-frame copies.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use padterm::buffer::diff::ColorMode;
use padterm::layout::Position;
use padterm::platform::Renderer;
use padterm::terminal::TerminalRenderer;
use padterm::text::{CellFont, TextShaper};
use padterm::widget::{OutputGrid, TextSlot};
use padterm::Rgba;
use std::io;

const GRAY: Rgba = Rgba::new(200, 200, 200, 255);

fn shape_line(c: &mut Criterion) {
    let font = CellFont::bundled();
    let line = "drwxr-xr-x  2 root root  4096 Jan  1 00:00 \x1b[01;34mbin\x1b[0m\tdir";

    c.bench_function("shape_ls_line", |b| {
        b.iter(|| font.render_blended(black_box(line), GRAY));
    });
}

fn set_text_and_render(c: &mut Criterion) {
    let font = CellFont::bundled();
    let mut renderer = TerminalRenderer::new(120, 44, ColorMode::TrueColor, io::sink());
    let mut slot = TextSlot::new(Position::new(1, 1), GRAY);
    let mut n = 0u32;

    c.bench_function("slot_set_text_render", |b| {
        b.iter(|| {
            n = n.wrapping_add(1);
            slot.set_text(black_box(&format!("echo {n}")), &font);
            renderer.clear();
            slot.render(&mut renderer);
        });
    });
}

fn grid_frame(c: &mut Criterion) {
    let font = CellFont::bundled();
    let positions: Vec<_> = (3..43).map(|y| Position::new(1, y)).collect();
    let mut grid = OutputGrid::new(&positions, GRAY, "---", &font);
    let lines: Vec<String> = (0..40).map(|i| format!("line {i}: some command output")).collect();
    grid.assign(&lines, &font);
    let mut renderer = TerminalRenderer::new(120, 44, ColorMode::TrueColor, io::sink());

    c.bench_function("grid_40_cached_frame", |b| {
        b.iter(|| {
            renderer.clear();
            grid.render(&mut renderer);
            renderer.present()
        });
    });
}

criterion_group!(benches, shape_line, set_text_and_render, grid_frame);
criterion_main!(benches);
