pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod segment;

use std::time::Duration;

pub use crate::config::{AppConfig, SelectorConfig};
pub use crate::error::{ExtractError, HarvestError};
pub use crate::model::Recipe;
pub use crate::normalize::IngredientMode;

use crate::extract::FieldExtractor;
use crate::fetch::GatewayFetcher;
use crate::normalize::PhraseNormalizer;
use crate::pipeline::BatchPipeline;
use crate::segment::ChunkSegmenter;

/// Harvest every identifier in `identifiers` and return the built records.
///
/// Wires the default collaborators together and runs the batch pipeline
/// over the configured locator table. Nothing is written here; the caller
/// serializes the returned collection in one pass.
pub fn harvest_recipes(
    identifiers: &[String],
    config: &AppConfig,
) -> Result<Vec<Recipe>, HarvestError> {
    let fetcher = GatewayFetcher::new(Some(Duration::from_secs(config.timeout)))?;
    let segmenter = ChunkSegmenter::new();
    let normalizer = PhraseNormalizer::new(
        IngredientMode::from_clean_flag(config.clean_ingredients),
        &segmenter,
    );
    let extractor = FieldExtractor::new(&config.selectors, normalizer)?;

    let pipeline = BatchPipeline::new(&fetcher, extractor);
    Ok(pipeline.run(identifiers))
}
