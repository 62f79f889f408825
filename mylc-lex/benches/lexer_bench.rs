use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mylc_lex::Lexer;

fn synthetic_module(repetitions: usize) -> String {
    let mut source = String::from("module bench;\n");
    for i in 0..repetitions {
        source.push_str(&format!(
            "export fn{i} : func = (a: in i32, b: in f32) -> f32 {{ return (a + b) * 2.0; }}\n"
        ));
    }
    source
}

fn bench_lexer(c: &mut Criterion) {
    let source = synthetic_module(500);
    c.bench_function("lex_synthetic_module", |b| {
        b.iter(|| {
            let (tokens, _) = Lexer::tokenize(black_box(&source));
            black_box(tokens.len())
        })
    });
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
