//! Benchmarks for ranking
//!
//! Run with: cargo bench --package scoring
//!
//! Uses a synthetic catalog so it runs without any data files.

use catalog::{Cuisine, DishDetail, Ingredient};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scoring::ScoringEngine;

fn synthetic_pool(dishes: u32, ingredients_per_dish: u32, distinct_ingredients: u32) -> Vec<DishDetail> {
    (0..dishes)
        .map(|id| DishDetail {
            id,
            name: format!("Dish {id}"),
            cuisine: Cuisine { id: id % 7, name: format!("CUISINE {}", id % 7) },
            ingredients: (0..ingredients_per_dish)
                .map(|k| {
                    let ingredient_id = (id * 31 + k * 17) % distinct_ingredients;
                    Ingredient {
                        id: ingredient_id,
                        name: format!("ingredient-{ingredient_id}"),
                        color: "#000000".to_string(),
                    }
                })
                .collect(),
            image_url: String::new(),
            description: String::new(),
        })
        .collect()
}

fn bench_rank_small_session(c: &mut Criterion) {
    let pool = synthetic_pool(200, 8, 120);
    let liked: Vec<_> = pool.iter().step_by(13).take(12).cloned().collect();
    let disliked: Vec<_> = pool.iter().skip(5).step_by(17).take(10).cloned().collect();
    let engine = ScoringEngine::new();

    c.bench_function("rank_200_dishes", |b| {
        b.iter(|| {
            let ranked = engine.rank(black_box(&liked), black_box(&disliked), black_box(&pool));
            black_box(ranked)
        })
    });
}

fn bench_rank_full_catalog(c: &mut Criterion) {
    let pool = synthetic_pool(5_000, 12, 600);
    let liked: Vec<_> = pool.iter().step_by(250).take(20).cloned().collect();
    let disliked: Vec<_> = pool.iter().skip(3).step_by(500).take(10).cloned().collect();
    let engine = ScoringEngine::new();

    c.bench_function("rank_5000_dishes", |b| {
        b.iter(|| {
            let ranked = engine.rank(black_box(&liked), black_box(&disliked), black_box(&pool));
            black_box(ranked)
        })
    });
}

criterion_group!(benches, bench_rank_small_session, bench_rank_full_catalog);
criterion_main!(benches);
