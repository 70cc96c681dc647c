use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lodec_par::Parser;

fn parse_source(source: &str) -> usize {
    let mut parser = Parser::new(source).expect("source lexes");
    let program = parser.build_ast().expect("source parses");
    program.stmts.len()
}

fn bench_parser(c: &mut Criterion) {
    let expressions = "i32 x = 1 + 2 * 3 - 4 / 5; x = x + 1; x += 2; x++;";

    let mut functions = String::new();
    for i in 0..50 {
        functions.push_str(&format!(
            "fn{i}(i32 a, i32 b) :: i32 {{ i32 c = a; c = c + b; return c; }}\n"
        ));
    }

    c.bench_function("parse_expressions", |b| {
        b.iter(|| parse_source(black_box(expressions)))
    });

    c.bench_function("parse_functions", |b| {
        b.iter(|| parse_source(black_box(&functions)))
    });
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
