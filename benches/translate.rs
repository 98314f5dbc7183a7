//! Benchmarks for the backend event path: decoding a frame and applying it.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gesture_kiosk::app::{Message, Model, Tuning, update};
use gesture_kiosk::protocol::{Event, parse_message};

fn bench_parse_cursor(c: &mut Criterion) {
    let frame = r#"{"type":"CURSOR","x":0.4182,"y":0.6271}"#;
    c.bench_function("parse_cursor", |b| {
        b.iter(|| parse_message(black_box(frame)))
    });
}

fn bench_parse_unknown(c: &mut Criterion) {
    let frame = r#"{"type":"ZOOM","level":2}"#;
    c.bench_function("parse_unknown", |b| {
        b.iter(|| parse_message(black_box(frame)))
    });
}

fn bench_cursor_stream(c: &mut Criterion) {
    let frames: Vec<String> = (0..60)
        .map(|i| {
            let t = f64::from(i) / 60.0;
            format!(r#"{{"type":"CURSOR","x":{t},"y":{}}}"#, 1.0 - t)
        })
        .collect();

    c.bench_function("cursor_stream_60", |b| {
        b.iter(|| {
            let mut model = update(
                Model::new((120, 40), &Tuning::default()),
                Message::Connected,
            );
            for (now_ms, frame) in (0u64..).step_by(16).zip(&frames) {
                if let Some(Event::Cursor { x, y }) = parse_message(black_box(frame)) {
                    model = update(model, Message::Cursor { x, y, now_ms });
                }
            }
            model
        })
    });
}

criterion_group!(
    benches,
    bench_parse_cursor,
    bench_parse_unknown,
    bench_cursor_stream
);
criterion_main!(benches);
