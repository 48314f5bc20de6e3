//! Playback benchmark: the script state machine, easing and frame diffs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use luna::canvas::{render_diff, Brush, Canvas, DiffState, Rgb};
use luna::sequencer::{Effect, PlaybackEvent};
use luna::{advance, AnimationVariant, CubicBezier, PlaybackState, RevealAnimation, Transition, LUNA_SCRIPT};
use std::time::{Duration, Instant};

/// Drive a playback from start to completion without timers.
fn play_through() -> PlaybackState {
    let mut state = PlaybackState::new();
    let mut event = PlaybackEvent::Evaluate;
    loop {
        let (next, effect) = advance(&state, LUNA_SCRIPT, event);
        state = next;
        event = match effect {
            Effect::Schedule { cursor, .. } => PlaybackEvent::DelayElapsed { cursor },
            Effect::Delivered { .. } | Effect::Restarted => PlaybackEvent::Evaluate,
            Effect::Completed | Effect::Ignored => return state,
        };
    }
}

fn script_playback(c: &mut Criterion) {
    c.bench_function("advance_luna_script", |b| b.iter(|| black_box(play_through())));
}

fn easing(c: &mut Criterion) {
    let curve = CubicBezier::default();
    c.bench_function("cubic_bezier_ease_100", |b| {
        b.iter(|| {
            (0..100u16)
                .map(|i| curve.ease(black_box(f32::from(i) / 100.0)))
                .sum::<f32>()
        })
    });
}

fn animation_sample(c: &mut Criterion) {
    let start = Instant::now();
    let mut animation = RevealAnimation::new(AnimationVariant::Rotate, Transition::default());
    animation.sync(true, start);
    let mid = start + Duration::from_millis(250);

    c.bench_function("reveal_style_at", |b| b.iter(|| animation.style_at(black_box(mid))));
}

/// A canvas with a line of text on every row.
fn painted(width: u16, height: u16, seed: u8) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    let clip = canvas.area();
    for y in 0..height {
        let fg = Rgb::new(seed.wrapping_mul(31), (y % 256) as u8, 200);
        let line = format!("{seed:02} Luna is always here to listen and talk, row {y}");
        canvas.draw_text(2, i32::from(y), &line, Brush::fg(fg), clip);
    }
    canvas
}

fn frame_diff(c: &mut Criterion) {
    let a = painted(120, 40, 0);
    let b_frame = painted(120, 40, 1);

    c.bench_function("render_diff_120x40", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(65536);
            let mut state = DiffState::new();
            render_diff(black_box(&a), black_box(&b_frame), &mut output, &mut state)
        })
    });
}

criterion_group!(benches, script_playback, easing, animation_sample, frame_diff);
criterion_main!(benches);
