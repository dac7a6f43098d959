use criterion::{criterion_group, criterion_main, Criterion};
use rpn::prelude::*;

const PROGRAM: &str = "40 2 1 * + 6 7 * + 84 2 / - 10 3 - *";

fn lex_and_parse() {
  let mut lexer = Lexer::new(Source::new("bench", PROGRAM));

  parse(&mut lexer).unwrap();
}

fn full_pipeline() {
  evaluate(Source::new("bench", PROGRAM)).unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
  c.bench_function("lex and parse", |b| b.iter(lex_and_parse));

  c.bench_function("evaluate", |b| b.iter(full_pipeline));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
