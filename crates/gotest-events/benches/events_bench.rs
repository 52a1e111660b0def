// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gotest_events::{Action, TestEvent, parse_events};

/// Build a `go test -json` stream with `tests` tests spread over ten packages
fn sample_stream(tests: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for i in 0..tests {
        let package = format!("example.com/pkg{}", i % 10);
        let test = format!("Test{i}");
        let events = [
            TestEvent::new(Action::Run, &package, &test),
            TestEvent::new(Action::Output, &package, &test)
                .with_output(format!("=== RUN   {test}\n")),
            TestEvent::new(Action::Pass, &package, &test).with_elapsed(0.01),
        ];
        for event in &events {
            serde_json::to_writer(&mut buf, event).expect("serialize");
            buf.push(b'\n');
        }
    }
    buf
}

fn parse_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_events");

    for tests in [100, 1_000, 10_000] {
        let stream = sample_stream(tests);
        group.throughput(Throughput::Bytes(stream.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tests), &stream, |b, stream| {
            b.iter(|| parse_events(&stream[..]).expect("parse failed"))
        });
    }

    group.finish();
}

criterion_group!(benches, parse_benchmarks);
criterion_main!(benches);
