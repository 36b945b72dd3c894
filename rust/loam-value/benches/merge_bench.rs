use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loam_value::{deep_copy, smart_merge, Value};

/// A nested object-definition patch, shaped like real prototype data: a few
/// scalar overrides, a nested map, and an object list to concatenate.
fn base_and_patch() -> (Value, Value) {
    let base = Value::from_json_str(
        r#"{
            "hp": 10,
            "speed": 2.5,
            "editor_info": {"category": "enemies", "help": "basic walker"},
            "animations": [
                {"id": "stand", "frames": 4},
                {"id": "walk", "frames": 8}
            ]
        }"#,
    )
    .expect("base parses");
    let patch = Value::from_json_str(
        r#"{
            "hp": 25,
            "editor_info": {"category": "bosses"},
            "animations": [{"id": "roar", "frames": 12}]
        }"#,
    )
    .expect("patch parses");
    (base, patch)
}

fn smart_merge_benchmark(c: &mut Criterion) {
    let (base, patch) = base_and_patch();
    c.bench_function("smart_merge/nested_definition", |b| {
        b.iter(|| {
            let mut dst = deep_copy(&base);
            smart_merge(&mut dst, black_box(&patch)).expect("kinds are compatible");
            black_box(dst)
        });
    });
}

fn deep_copy_benchmark(c: &mut Criterion) {
    let (base, _) = base_and_patch();
    c.bench_function("deep_copy/nested_definition", |b| {
        b.iter(|| black_box(deep_copy(black_box(&base))));
    });
}

criterion_group!(benches, smart_merge_benchmark, deep_copy_benchmark);
criterion_main!(benches);
