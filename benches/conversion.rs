//! Benchmarks for the conversion core and the operator path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mapconv::{
    range_to_stops, stops_to_range, ColorStop, Colour, Conversion, NodeGraph, RampInterpolation,
    RangeSpec, StopSet, WarningLog,
};

const GRAPH: &str = r##"
active: Ramp
nodes:
  - { name: Noise, node: { kind: generic } }
  - name: Ramp
    node:
      kind: color_ramp
      interpolation: EASE
      stops:
        - { position: 0.1, color: "#202020" }
        - { position: 0.9, color: "#E0E0E0" }
  - { name: Shader, node: { kind: generic } }
links:
  - { from: "Noise:Fac", to: "Ramp:Fac" }
  - { from: "Ramp:Color", to: "Shader:Base Color" }
  - { from: "Ramp:Alpha", to: "Shader:Alpha" }
"##;

// -- Core benchmarks --

fn bench_core(c: &mut Criterion) {
    let mut group = c.benchmark_group("core");

    let stops = StopSet::new(
        RampInterpolation::Linear,
        (0..8)
            .map(|i| ColorStop::new(i as f32 / 7.0, Colour::grey(i as f32 / 7.0)))
            .collect(),
    )
    .unwrap();

    group.bench_function("stops_to_range", |b| {
        b.iter(|| stops_to_range(black_box(&stops), &mut WarningLog::new()))
    });

    let continuous = RangeSpec::default().with_to(0.2, 0.8);
    group.bench_function("range_to_stops_linear", |b| {
        b.iter(|| range_to_stops(black_box(&continuous), &mut WarningLog::new()).unwrap())
    });

    let stepped = RangeSpec::default().stepped(31.0);
    group.bench_function("range_to_stops_stepped_32", |b| {
        b.iter(|| range_to_stops(black_box(&stepped), &mut WarningLog::new()).unwrap())
    });

    group.finish();
}

// -- Operator benchmarks --

fn bench_operator(c: &mut Criterion) {
    let mut group = c.benchmark_group("operator");
    let graph = NodeGraph::parse(GRAPH).unwrap();

    group.bench_function("parse_document", |b| {
        b.iter(|| NodeGraph::parse(black_box(GRAPH)).unwrap())
    });

    group.bench_function("ramp_to_range_round_trip", |b| {
        b.iter(|| {
            let mut g = graph.clone();
            let mut log = WarningLog::new();
            Conversion::ToMapRange.execute(&mut g, &mut log).unwrap();
            Conversion::ToColorRamp.execute(&mut g, &mut log).unwrap();
            g
        })
    });

    group.finish();
}

criterion_group!(benches, bench_core, bench_operator);
criterion_main!(benches);
