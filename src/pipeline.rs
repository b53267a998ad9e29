use log::{debug, warn};
use scraper::Html;

use crate::extract::FieldExtractor;
use crate::fetch::PageFetcher;
use crate::model::Recipe;

/// Drives the whole run: fetch each identifier, extract the usable ones,
/// number the survivors.
///
/// Strictly sequential; the id counter and the accumulator are owned by the
/// loop and nothing else ever touches them.
pub struct BatchPipeline<'a> {
    fetcher: &'a dyn PageFetcher,
    extractor: FieldExtractor<'a>,
}

impl<'a> BatchPipeline<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, extractor: FieldExtractor<'a>) -> Self {
        Self { fetcher, extractor }
    }

    /// Process `identifiers` in order and return the built records.
    ///
    /// A failed or empty fetch skips the identifier without consuming an id;
    /// a fatal field absence drops the record. Either way the run continues.
    /// Ids are dense, starting at 0, assigned in build order.
    pub fn run(&self, identifiers: &[String]) -> Vec<Recipe> {
        let mut recipes = Vec::new();
        let mut next_id: u64 = 0;

        for identifier in identifiers {
            let identifier = identifier.trim();
            if identifier.is_empty() {
                continue;
            }

            let result = match self.fetcher.fetch(identifier) {
                Ok(result) => result,
                Err(err) => {
                    warn!("skipping {identifier}: {err}");
                    continue;
                }
            };

            if !result.is_usable() {
                warn!(
                    "skipping {identifier}: gateway status {}, empty or missing body",
                    result.response.status_code
                );
                continue;
            }

            let body = result.response.body.as_deref().unwrap_or_default();
            let document = Html::parse_document(body);

            match self.extractor.extract(&document, &result.url) {
                Ok(fields) => {
                    debug!("built record {next_id} for {identifier}");
                    recipes.push(Recipe::assemble(next_id, fields));
                    next_id += 1;
                }
                Err(err) => {
                    warn!("dropping {identifier}: {err}");
                }
            }
        }

        recipes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SelectorConfig;
    use crate::error::HarvestError;
    use crate::fetch::{FetchResponse, FetchResult};
    use crate::normalize::{IngredientMode, PhraseNormalizer};
    use crate::segment::ChunkSegmenter;

    /// Serves canned envelopes in order, standing in for the gateway.
    /// `None` plays a transport failure.
    struct ScriptedFetcher {
        results: Vec<Option<FetchResult>>,
        cursor: std::cell::Cell<usize>,
    }

    impl ScriptedFetcher {
        fn new(results: Vec<Option<FetchResult>>) -> Self {
            Self {
                results,
                cursor: std::cell::Cell::new(0),
            }
        }
    }

    impl PageFetcher for ScriptedFetcher {
        fn fetch(&self, identifier: &str) -> Result<FetchResult, HarvestError> {
            let index = self.cursor.get();
            self.cursor.set(index + 1);
            self.results[index]
                .clone()
                .ok_or_else(|| HarvestError::SelectorError {
                    field: "test transport failure",
                    selector: identifier.to_string(),
                })
        }
    }

    fn envelope(status: u16, body: Option<&str>, url: &str) -> FetchResult {
        FetchResult {
            response: FetchResponse {
                status_code: status,
                body: body.map(str::to_string),
            },
            url: url.to_string(),
        }
    }

    fn page(name: &str, overview: &str) -> String {
        format!(
            r#"<html><body>
                <h1 class="comp type--lion article-heading mntl-text-block">{name}</h1>
                <p class="comp type--dog article-subheading">{overview}</p>
            </body></html>"#
        )
    }

    const SEGMENTER: ChunkSegmenter = ChunkSegmenter;

    fn pipeline(fetcher: &dyn PageFetcher) -> BatchPipeline<'_> {
        let normalizer = PhraseNormalizer::new(IngredientMode::Raw, &SEGMENTER);
        let extractor = FieldExtractor::new(&SelectorConfig::default(), normalizer).unwrap();
        BatchPipeline::new(fetcher, extractor)
    }

    #[test]
    fn skipped_identifiers_consume_no_id() {
        let fetcher = ScriptedFetcher::new(vec![
            Some(envelope(200, Some(&page("First", "One.")), "https://a")),
            Some(envelope(404, None, "https://b")),
            Some(envelope(200, Some(&page("Third", "Three.")), "https://c")),
        ]);

        let recipes = pipeline(&fetcher).run(&[
            "https://a".to_string(),
            "https://b".to_string(),
            "https://c".to_string(),
        ]);

        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].id, 0);
        assert_eq!(recipes[0].name, "First");
        assert_eq!(recipes[1].id, 1);
        assert_eq!(recipes[1].name, "Third");
    }

    #[test]
    fn fetch_transport_error_does_not_abort_the_batch() {
        let fetcher = ScriptedFetcher::new(vec![
            None,
            Some(envelope(200, Some(&page("Kept", "Still here.")), "https://b")),
        ]);

        let recipes = pipeline(&fetcher).run(&["https://a".to_string(), "https://b".to_string()]);

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, 0);
        assert_eq!(recipes[0].name, "Kept");
    }

    #[test]
    fn dropped_record_consumes_no_id() {
        let no_overview = r#"<html><body>
            <h1 class="comp type--lion article-heading mntl-text-block">Nameless</h1>
        </body></html>"#;
        let fetcher = ScriptedFetcher::new(vec![
            Some(envelope(200, Some(no_overview), "https://a")),
            Some(envelope(200, Some(&page("Survivor", "Intact.")), "https://b")),
        ]);

        let recipes = pipeline(&fetcher).run(&["https://a".to_string(), "https://b".to_string()]);

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].id, 0);
        assert_eq!(recipes[0].name, "Survivor");
    }

    #[test]
    fn blank_input_lines_are_ignored() {
        let fetcher = ScriptedFetcher::new(vec![Some(envelope(
            200,
            Some(&page("Only", "Entry.")),
            "https://a",
        ))]);

        let recipes = pipeline(&fetcher).run(&[
            "  ".to_string(),
            String::new(),
            "https://a\n".to_string(),
        ]);

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].url, "https://a");
    }
}
