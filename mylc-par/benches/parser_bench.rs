use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mylc_par::Parser;

fn synthetic_module(repetitions: usize) -> String {
    let mut source = String::from("module bench;\n");
    for i in 0..repetitions {
        source.push_str(&format!(
            "export fn{i} : func = (a: in i32, b: in f32) -> f32 {{ return (a + b) * 2.0; }}\n"
        ));
    }
    source
}

fn bench_parser(c: &mut Criterion) {
    let source = synthetic_module(500);
    c.bench_function("parse_synthetic_module", |b| {
        b.iter(|| {
            let (result, _) = Parser::parse_source(black_box(&source));
            black_box(result.expect("synthetic module should parse").decls.len())
        })
    });
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
