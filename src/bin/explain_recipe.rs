// Explain a single recipe from the command line
//
// Usage: explain_recipe <recipe-id> [json|markdown]
// Reads CATALOG_PATH (falls back to the built-in fixtures) and CONFIG_PATH.

use anyhow::{bail, Context};
use recipe_scorer_rust::{
    Catalog, EngineConfig, ExplanationGenerator, JsonFormatter, MarkdownFormatter, SustainabilityScorer,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_scorer_rust=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let id: u64 = args
        .next()
        .context("usage: explain_recipe <recipe-id> [json|markdown]")?
        .parse()
        .context("recipe id must be a positive integer")?;
    let format = args.next().unwrap_or_else(|| "markdown".to_string());

    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => EngineConfig::load(&PathBuf::from(path))?,
        Err(_) => EngineConfig::default(),
    };
    let catalog_path = std::env::var("CATALOG_PATH").ok().map(PathBuf::from);

    let scorer = SustainabilityScorer::new(config.scoring.clone());
    let (catalog, _) = Catalog::load_or_fallback(catalog_path.as_deref(), &scorer);

    let Some(recipe) = catalog.get(id) else {
        bail!("recipe {} not found in catalog ({} recipes)", id, catalog.len());
    };

    let explanation = ExplanationGenerator::new(config.scoring).generate(recipe);

    match format.as_str() {
        "json" => println!("{}", JsonFormatter::format(&explanation)?),
        "markdown" | "md" => print!("{}", MarkdownFormatter::format(&explanation)),
        other => bail!("unknown format '{}' (expected json or markdown)", other),
    }

    Ok(())
}
