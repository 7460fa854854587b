// Criterion benchmarks for catalog preparation, search and explanation
//
// Run with: cargo bench --bench search_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use recipe_scorer_rust::{
    Catalog, CatalogSource, ExplanationGenerator, RawRecipe, SearchEngine, SustainabilityScorer, TestGroup,
};

const INGREDIENTS: &[&str] = &[
    "marha", "vöröshagyma", "paprika", "paradicsom", "lencse", "sárgarépa", "fokhagyma", "rizs",
    "csirkemell", "spenót", "burgonya", "sajt", "vaj", "tojás", "liszt", "zabpehely", "alma",
    "csicseriborsó", "kókusztej", "gomba",
];

/// Synthetic catalog of `size` recipes with varied ingredients and scores
fn synthetic_catalog(size: usize) -> Catalog {
    let raws: Vec<RawRecipe> = (0..size)
        .map(|i| {
            let ingredients: Vec<&str> = (0..5).map(|k| INGREDIENTS[(i * 7 + k * 3) % INGREDIENTS.len()]).collect();
            RawRecipe {
                id: Some(i as i64 + 1),
                name: Some(format!("Recept {}", i + 1)),
                ingredients: Some(ingredients.join(", ")),
                env_score: Some(((i * 37) % 100) as f64 + 1.0),
                nutri_score: Some(((i * 53) % 100) as f64 + 1.0),
                ..Default::default()
            }
        })
        .collect();

    Catalog::prepare(raws, &SustainabilityScorer::default(), CatalogSource::Records).0
}

fn bench_search(c: &mut Criterion) {
    let engine = SearchEngine::default();
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 10_000] {
        let catalog = synthetic_catalog(size);
        for test_group in TestGroup::ALL {
            group.bench_with_input(
                BenchmarkId::new(format!("marha_hagyma_{}", test_group), size),
                &catalog,
                |b, catalog| {
                    let mut rng = StdRng::seed_from_u64(42);
                    b.iter(|| engine.search(catalog.recipes(), black_box("marha, hagyma"), test_group, &mut rng))
                },
            );
        }
    }

    group.finish();
}

fn bench_preparation(c: &mut Criterion) {
    c.bench_function("prepare_catalog_10k", |b| b.iter(|| synthetic_catalog(black_box(10_000))));
}

fn bench_explanation(c: &mut Criterion) {
    let catalog = synthetic_catalog(100);
    let generator = ExplanationGenerator::default();
    c.bench_function("explain_rule_based", |b| {
        b.iter(|| {
            for recipe in catalog.recipes() {
                black_box(generator.generate(recipe));
            }
        })
    });
}

criterion_group!(benches, bench_search, bench_preparation, bench_explanation);
criterion_main!(benches);
