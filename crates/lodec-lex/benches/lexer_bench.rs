use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lodec_lex::{Lexer, TokenKind};

fn lex_to_eof(source: &str) -> usize {
    let mut lexer = Lexer::new(source);
    let mut count = 0;
    loop {
        let token = lexer.scan_token();
        if token.kind == TokenKind::Eof {
            break;
        }
        count += 1;
    }
    count
}

fn bench_lexer(c: &mut Criterion) {
    let small = "i32 x = 5; x = x + 1;";
    let large = small.repeat(500);

    c.bench_function("lex_small_program", |b| {
        b.iter(|| lex_to_eof(black_box(small)))
    });

    c.bench_function("lex_large_program", |b| {
        b.iter(|| lex_to_eof(black_box(&large)))
    });
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
