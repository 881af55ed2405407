use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use golib_config::{
    convert_struct, mapping, Config, ConfigReader, Encoder, JsonEncoder, Mapping, TomlEncoder,
    Value, YamlEncoder,
};

#[derive(Debug, Default)]
struct Server {
    host: String,
    port: u16,
    workers: Vec<Worker>,
}

#[derive(Debug, Default)]
struct Worker {
    name: String,
    weight: f64,
    enabled: bool,
}

convert_struct!(Server { host, port, workers });
convert_struct!(Worker { name, weight, enabled });

fn sample_tree(workers: usize) -> Mapping {
    let list = (0..workers)
        .map(|i| {
            Value::from(mapping! {
                "name" => format!("worker-{i}"),
                "weight" => i as f64 / 3.0,
                "enabled" => i % 2 == 0,
            })
        })
        .collect::<Vec<_>>();
    mapping! {
        "server" => mapping! {
            "host" => "localhost",
            "port" => 8080,
            "workers" => list,
        },
    }
}

fn bench_encode(c: &mut Criterion) {
    let tree = sample_tree(100);
    let json = serde_json::to_vec(&tree).unwrap();
    let yaml = serde_yaml::to_string(&tree).unwrap();
    let toml = toml::to_string(&tree).unwrap();

    let mut group = c.benchmark_group("encode");
    group.bench_function("json", |b| b.iter(|| JsonEncoder.encode(black_box(&json))));
    group.bench_function("yaml", |b| {
        b.iter(|| YamlEncoder.encode(black_box(yaml.as_bytes())))
    });
    group.bench_function("toml", |b| {
        b.iter(|| TomlEncoder.encode(black_box(toml.as_bytes())))
    });
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let cfg = Config::from_raw(sample_tree(100));

    c.bench_function("raw_by_key", |b| {
        b.iter(|| cfg.raw_by_key(black_box("server.port")))
    });
    c.bench_function("get_struct", |b| {
        b.iter(|| {
            let mut server = Server::default();
            cfg.get_by_key(black_box("server"), &mut server).map(|()| server)
        })
    });
    c.bench_function("inner", |b| b.iter(|| cfg.inner(black_box("server"))));
}

criterion_group!(benches, bench_encode, bench_lookup);
criterion_main!(benches);
