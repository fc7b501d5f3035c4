//! Response parsing and prompt rendering benchmarks.
//!
//! Measures the per-pair work done between LLM calls: rendering the user
//! prompt and turning the reply into a prior row.

use autoelicit::dataset::{breast_cancer, Parser};
use autoelicit::elicit::parse_priors;
use autoelicit::llm::priors_json;
use autoelicit::prompt;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Write;
use tempfile::NamedTempFile;

/// Synthetic feature names for scaling runs.
fn generate_feature_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("feature {}", i)).collect()
}

/// A well-formed reply for `names`.
fn generate_reply(names: &[String]) -> String {
    let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    let priors: Vec<(f64, f64)> = (0..names.len())
        .map(|i| ((i % 7) as f64 * 0.25 - 0.75, 0.1 + (i % 3) as f64 * 0.2))
        .collect();
    priors_json(&refs, &priors)
}

/// Generate a wdbc.data-style file.
fn generate_wdbc_data(rows: usize) -> String {
    let mut data = String::new();
    for row in 0..rows {
        data.push_str(&format!("{},{}", 842302 + row, if row % 3 == 0 { "M" } else { "B" }));
        for col in 0..breast_cancer::FEATURE_NAMES.len() {
            data.push_str(&format!(",{:.4}", 1.0 + ((row * 31 + col * 17) % 97) as f64 / 10.0));
        }
        data.push('\n');
    }
    data
}

/// Benchmark parsing a breast-cancer reply, bare and wrapped in prose.
fn bench_parse_breast_cancer_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_breast_cancer_reply");

    let names = breast_cancer::feature_names();
    let bare = generate_reply(&names);
    let fenced = format!("Here are the priors:\n```json\n{}\n```\nLet me know.", bare);
    let thinking = format!("<think>{}</think>\n{}", "weighing features ".repeat(200), bare);

    for (label, reply) in [("bare", &bare), ("fenced", &fenced), ("think", &thinking)] {
        group.throughput(Throughput::Bytes(reply.len() as u64));
        group.bench_with_input(BenchmarkId::new("format", label), reply, |b, reply| {
            b.iter(|| black_box(parse_priors(reply, &names, 0).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark parsing as the feature count grows.
fn bench_parse_feature_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_feature_scaling");

    for count in [10, 30, 100, 500].iter() {
        let names = generate_feature_names(*count);
        let reply = generate_reply(&names);

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("features", count), &reply, |b, reply| {
            b.iter(|| black_box(parse_priors(reply, &names, 0).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark rendering the built-in user roles.
fn bench_render_user_roles(c: &mut Criterion) {
    let names = breast_cancer::feature_names();
    let roles = prompt::breast_cancer::user_roles();

    c.bench_function("render_user_roles", |b| {
        b.iter(|| {
            for role in &roles {
                black_box(role.render(&names).unwrap());
            }
        })
    });
}

/// Benchmark loading wdbc.data files of various sizes.
fn bench_load_wdbc(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_wdbc");

    for rows in [569, 5_690].iter() {
        let data = generate_wdbc_data(*rows);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".data").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| black_box(breast_cancer::load(temp.path()).unwrap()),
            )
        });
    }

    group.finish();
}

/// Benchmark generic delimited loading with a target column.
fn bench_load_delimited(c: &mut Criterion) {
    let names = generate_feature_names(20);
    let mut data = names.join(",");
    data.push_str(",label\n");
    for row in 0..1_000 {
        let values: Vec<String> = (0..names.len())
            .map(|col| format!("{:.3}", ((row + col) % 50) as f64 / 7.0))
            .collect();
        data.push_str(&values.join(","));
        data.push_str(if row % 2 == 0 { ",yes\n" } else { ",no\n" });
    }

    c.bench_function("load_delimited_1000x20", |b| {
        b.iter_with_setup(
            || {
                let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                temp.write_all(data.as_bytes()).unwrap();
                temp
            },
            |temp| {
                let parser = Parser::new();
                black_box(parser.load_dataset(temp.path(), "bench", Some("label")).unwrap())
            },
        )
    });
}

criterion_group!(
    benches,
    bench_parse_breast_cancer_reply,
    bench_parse_feature_scaling,
    bench_render_user_roles,
    bench_load_wdbc,
    bench_load_delimited,
);
criterion_main!(benches);
