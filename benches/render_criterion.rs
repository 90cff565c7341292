use criterion::{Criterion, criterion_group, criterion_main};
use fireguard_core::{ConditionGroup, parse_group, render_group};
use std::hint::black_box;

const GROUP_TEXT: &str = r#"{
    "operation": "&&",
    "conditions": [
        ["doc", ["users", ["param", "uid"]], ["field", ["isAdmin"]]],
        [["field", ["updatedAt"]], "withinRequest", "minutes", 5],
        [["field", ["location"]], "distanceTo", ["latlng", 51.5, -0.12], "<", 1000],
        [["field", ["profile"]], "keys", "hasOnly", ["name", "bio", "avatar"]],
        {
            "operation": "||",
            "conditions": [
                [["field", ["tags"]], "hasAny", ["public", "shared", 1, 2]],
                [["field", ["owner"]], "==", ["param", "uid"]],
                [["field", ["scores"]], "get", 0, ">=", 10]
            ]
        }
    ]
}"#;

fn benchmark_render(c: &mut Criterion) {
    let group: ConditionGroup = parse_group(GROUP_TEXT).expect("benchmark group is valid");

    let mut bench = c.benchmark_group("render");
    bench.bench_function("parse_group", |b| {
        b.iter(|| parse_group(black_box(GROUP_TEXT)).expect("benchmark group is valid"));
    });
    bench.bench_function("render_group", |b| {
        b.iter(|| render_group(black_box(&group)).expect("benchmark group renders"));
    });
    bench.finish();
}

criterion_group!(benches, benchmark_render);
criterion_main!(benches);
