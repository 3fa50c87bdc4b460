//! Pipeline Benchmarks
//!
//! Measures each stage of schema conversion over a generated schema:
//! - Tokenizing
//! - Parsing
//! - Converting a parsed schema into a document
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench -p tblsgen-tbls --bench convert
//! ```

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;

use tblsgen_schema::{parse_schema, tokenize};
use tblsgen_tbls::{DocumentMeta, convert_schema};

/// Build a schema with `models` user/post pairs linked by a relation.
fn generate_schema(models: usize) -> String {
    let mut source = String::new();
    for i in 0..models {
        let _ = write!(
            source,
            r#"
/// Account number {i}
model User{i} {{
    id        Int      @id @default(autoincrement())
    email     String   @unique
    name      String?
    createdAt DateTime @default(now())
    posts     Post{i}[]
}}

model Post{i} {{
    id       Int     @id @default(autoincrement())
    title    String
    body     String? @map("content")
    authorId Int
    author   User{i} @relation(fields: [authorId], references: [id])

    @@index([authorId, title])
}}
"#
        );
    }
    source.push_str("enum Role {\n    USER\n    ADMIN\n}\n");
    source
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for size in [1, 10, 100] {
        let source = generate_schema(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(tokenize(source)))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for size in [1, 10, 100] {
        let source = generate_schema(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| black_box(parse_schema(source)))
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let meta = DocumentMeta::default();
    for size in [1, 10, 100] {
        let Ok(schema) = parse_schema(&generate_schema(size)) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &schema, |b, schema| {
            b.iter(|| black_box(convert_schema(schema, &meta)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse, bench_convert);
criterion_main!(benches);
