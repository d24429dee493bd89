//! Frame diff benchmark: a console frame whose output grid changes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use padterm::buffer::diff::{render_diff, render_full, ColorMode, DiffState};
use padterm::{Buffer, Modifiers, Rgb};

const TEXT: Rgb = Rgb::new(200, 200, 200);

/// A frame laid out like the console: prompt, `rows` output lines, error.
fn console_frame(width: u16, height: u16, seed: u16) -> Buffer {
    let mut buffer = Buffer::new(width, height);
    let write = |buffer: &mut Buffer, y: u16, text: &str| {
        for (x, ch) in (1..width).zip(text.chars()) {
            let mut utf8 = [0u8; 4];
            let grapheme = ch.encode_utf8(&mut utf8);
            buffer.set_grapheme(x, y, grapheme, TEXT, Rgb::BLACK, Modifiers::BOLD);
        }
    };

    write(&mut buffer, 1, "ls -la /usr/lib");
    for y in 3..height.saturating_sub(2) {
        let size = u32::from(y) * 4096;
        let line = format!("-rw-r--r-- 1 root root {size:>8} lib{}.so", y + seed);
        write(&mut buffer, y, &line);
    }
    write(&mut buffer, height - 1, ".");
    buffer
}

fn diff_identical(c: &mut Criterion) {
    let frame = console_frame(120, 44, 0);
    let same = frame.clone();

    c.bench_function("diff_120x44_identical", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(4096);
            let mut state = DiffState::new();
            render_diff(
                black_box(&frame),
                black_box(&same),
                ColorMode::TrueColor,
                &mut output,
                &mut state,
            )
        });
    });
}

fn diff_new_output(c: &mut Criterion) {
    let before = console_frame(120, 44, 0);
    let after = console_frame(120, 44, 7);

    let mut group = c.benchmark_group("diff_new_output");
    for mode in [ColorMode::TrueColor, ColorMode::Indexed] {
        let id = BenchmarkId::from_parameter(format!("{mode:?}"));
        group.bench_with_input(id, &mode, |b, &mode| {
            b.iter(|| {
                let mut output = Vec::with_capacity(65536);
                let mut state = DiffState::new();
                render_diff(black_box(&before), black_box(&after), mode, &mut output, &mut state)
            });
        });
    }
    group.finish();
}

fn full_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_redraw");
    for (width, height) in [(80, 24), (120, 44), (200, 60)] {
        let frame = console_frame(width, height, 0);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &frame,
            |b, frame| {
                b.iter(|| {
                    let mut output = Vec::with_capacity(65536);
                    let mut state = DiffState::new();
                    render_full(black_box(frame), ColorMode::TrueColor, &mut output, &mut state);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, diff_identical, diff_new_output, full_redraw);
criterion_main!(benches);
