//! Criterion benchmarks for the search hot path
//!
//! These benchmarks measure:
//! - Query construction for growing ingredient lists
//! - In-memory store evaluation of a built query
//! - Result highlighting

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recipe_finder::client::{highlight, render_recipe};
use recipe_finder::models::{MatchMode, Recipe};
use recipe_finder::query::QueryBuilder;
use recipe_finder::state::{InMemoryStore, RecipeStore};

const INGREDIENTS: [&str; 8] = [
    "tomato", "onion", "garlic", "basil", "egg", "milk", "butter", "flour",
];

fn ingredient_list(n: usize) -> Vec<String> {
    INGREDIENTS.iter().cycle().take(n).map(|s| s.to_string()).collect()
}

fn recipe_table(rows: usize) -> Vec<Recipe> {
    (0..rows)
        .map(|i| {
            let a = INGREDIENTS[i % INGREDIENTS.len()];
            let b = INGREDIENTS[(i * 3 + 1) % INGREDIENTS.len()];
            Recipe::new(
                format!("Recipe {i}"),
                "Benchmark fixture",
                format!("{a}, {b}, salt, pepper"),
                format!("Combine the {a} and {b}. Season to taste."),
            )
        })
        .collect()
}

/// Benchmark query construction
fn bench_query_build(c: &mut Criterion) {
    let builder = QueryBuilder::new("info");
    let mut group = c.benchmark_group("query_build");

    for n in [1usize, 4, 16, 64] {
        let ingredients = ingredient_list(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &ingredients, |b, items| {
            b.iter(|| {
                builder
                    .build(black_box(items), MatchMode::Any, black_box(3), 20)
                    .unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark in-memory search over a fixed table
fn bench_memory_search(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let store = InMemoryStore::new(recipe_table(10_000));
    let builder = QueryBuilder::new("info");

    let mut group = c.benchmark_group("memory_search");
    for mode in [MatchMode::All, MatchMode::Any] {
        let query = builder.build(&ingredient_list(2), mode, 1, 50).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(mode), &query, |b, query| {
            b.iter(|| runtime.block_on(store.search(black_box(query))).unwrap());
        });
    }
    group.finish();
}

/// Benchmark highlighting and rendering
fn bench_highlight(c: &mut Criterion) {
    let text = "Tomato, red onion, garlic, basil, olive oil, salt, pepper, ".repeat(8);
    let ingredients = ingredient_list(4);

    c.bench_function("highlight_text", |b| {
        b.iter(|| highlight(black_box(&text), black_box(&ingredients)));
    });

    let recipe = &recipe_table(1)[0];
    c.bench_function("render_recipe", |b| {
        b.iter(|| render_recipe(black_box(recipe), black_box(&ingredients)));
    });
}

criterion_group!(benches, bench_query_build, bench_memory_search, bench_highlight);
criterion_main!(benches);
