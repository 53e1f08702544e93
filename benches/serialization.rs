use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_kstruct::{evaluate, from_str, parse, serialize, to_string, tokenize};

#[derive(Serialize, Deserialize, Clone)]
struct Service {
    name: String,
    port: u16,
    replicas: u32,
    enabled: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Deployment {
    id: u32,
    limits: Limits,
    services: Vec<Service>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Limits {
    cpu: f64,
    memory: i64,
}

fn services(size: u32) -> Vec<Service> {
    (0..size)
        .map(|i| Service {
            name: format!("svc-{}", i),
            port: 8000 + u16::try_from(i % 1000).unwrap_or(0),
            replicas: i % 5 + 1,
            enabled: i % 2 == 0,
        })
        .collect()
}

fn document(size: usize) -> String {
    let mut text = String::from("// generated\n");
    for i in 0..size {
        text.push_str(&format!(
            "node{i}(id = {i}, label = \"n\" + \"{i}\") {{\n   weight = {i}.5\n   tags = [\"a\", \"b\", 'c']\n   /* nested /* comment */ */\n}}\n"
        ));
    }
    text
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 100, 1000].iter() {
        let text = document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| evaluate(tokenize(black_box(text)).unwrap()))
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_serialize_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_tree");

    for size in [10, 100, 1000].iter() {
        let root = parse(&document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &root, |b, root| {
            b.iter(|| serialize(black_box(root)))
        });
    }
    group.finish();
}

fn benchmark_serde_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serde_array");

    for size in [10, 100, 500].iter() {
        let list = services(*size);
        let text = to_string(&list).unwrap();

        group.bench_with_input(BenchmarkId::new("serialize", size), &list, |b, list| {
            b.iter(|| to_string(black_box(list)))
        });
        group.bench_with_input(BenchmarkId::new("deserialize", size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Service>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let deployment = Deployment {
        id: 42,
        limits: Limits {
            cpu: 1.5,
            memory: 4_294_967_296,
        },
        services: services(20),
    };

    let mut group = c.benchmark_group("comparison");

    group.bench_function("kstruct_serialize", |b| {
        b.iter(|| serde_kstruct::to_string(black_box(&deployment)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&deployment)))
    });

    let kstruct_str = serde_kstruct::to_string(&deployment).unwrap();
    let json_str = serde_json::to_string(&deployment).unwrap();

    group.bench_function("kstruct_deserialize", |b| {
        b.iter(|| serde_kstruct::from_str::<Deployment>(black_box(&kstruct_str)))
    });

    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<Deployment>(black_box(&json_str)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_parse,
    benchmark_serialize_tree,
    benchmark_serde_array,
    benchmark_comparison_with_json
);
criterion_main!(benches);
