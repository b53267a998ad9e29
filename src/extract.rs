use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::config::SelectorConfig;
use crate::error::{ExtractError, HarvestError};
use crate::model::ExtractedFields;
use crate::normalize::PhraseNormalizer;

/// Pulls the recipe fields out of one page's parsed markup.
///
/// All locators come from the injected [`SelectorConfig`]; selectors are
/// parsed once at construction so a bad locator fails at startup instead of
/// per page.
pub struct FieldExtractor<'a> {
    selectors: FieldSelectors,
    image_attr: String,
    image_fallback_attr: String,
    normalizer: PhraseNormalizer<'a>,
}

struct FieldSelectors {
    name: Selector,
    image: Selector,
    instructions_outer: Selector,
    instructions_inner: Selector,
    instruction_step: Selector,
    ingredient: Selector,
    overview: Selector,
    time: Selector,
    rating: Selector,
}

fn parse_selector(field: &'static str, selector: &str) -> Result<Selector, HarvestError> {
    Selector::parse(selector).map_err(|_| HarvestError::SelectorError {
        field,
        selector: selector.to_string(),
    })
}

impl<'a> FieldExtractor<'a> {
    pub fn new(
        config: &SelectorConfig,
        normalizer: PhraseNormalizer<'a>,
    ) -> Result<Self, HarvestError> {
        let selectors = FieldSelectors {
            name: parse_selector("name", &config.name)?,
            image: parse_selector("image", &config.image)?,
            instructions_outer: parse_selector("instructions_outer", &config.instructions_outer)?,
            instructions_inner: parse_selector("instructions_inner", &config.instructions_inner)?,
            instruction_step: parse_selector("instruction_step", &config.instruction_step)?,
            ingredient: parse_selector("ingredient", &config.ingredient)?,
            overview: parse_selector("overview", &config.overview)?,
            time: parse_selector("time", &config.time)?,
            rating: parse_selector("rating", &config.rating)?,
        };

        Ok(Self {
            selectors,
            image_attr: config.image_attr.clone(),
            image_fallback_attr: config.image_fallback_attr.clone(),
            normalizer,
        })
    }

    /// Extract every field from `document`.
    ///
    /// `fetch_url` is the canonical URL the gateway reported, carried into
    /// the record as-is. Missing name or overview is fatal for the record;
    /// every other absence resolves to its documented default.
    pub fn extract(
        &self,
        document: &Html,
        fetch_url: &str,
    ) -> Result<ExtractedFields, ExtractError> {
        let name = document
            .select(&self.selectors.name)
            .next()
            .ok_or(ExtractError::MissingName)?;
        let name = element_text(&name).trim().to_string();

        let overview = document
            .select(&self.selectors.overview)
            .next()
            .ok_or(ExtractError::MissingOverview)?;
        let overview = element_text(&overview).trim_matches('\n').to_string();

        let image_url = self.extract_image_url(document);
        let instructions = self.extract_instructions(document);
        let ingredients = self.extract_ingredients(document);

        let time = document
            .select(&self.selectors.time)
            .next()
            .map(|el| element_text(&el));

        let rating = document
            .select(&self.selectors.rating)
            .next()
            .map(|el| element_text(&el).trim().to_string());

        debug!(
            "extracted '{}': {} ingredients, {} steps",
            name,
            ingredients.len(),
            instructions.len()
        );

        Ok(ExtractedFields {
            name,
            ingredients,
            url: fetch_url.to_string(),
            time,
            rating,
            image_url,
            instructions,
            overview,
        })
    }

    /// Primary source attribute of the first image element, falling back to
    /// the secondary attribute, then to the empty string. Never fails.
    fn extract_image_url(&self, document: &Html) -> String {
        document
            .select(&self.selectors.image)
            .next()
            .and_then(|img| {
                img.value()
                    .attr(&self.image_attr)
                    .filter(|value| !value.is_empty())
                    .or_else(|| img.value().attr(&self.image_fallback_attr))
                    .map(str::to_string)
            })
            .unwrap_or_default()
    }

    /// Step paragraphs from the two-level instructions container. A missing
    /// outer or inner container yields an empty sequence.
    fn extract_instructions(&self, document: &Html) -> Vec<String> {
        let mut instructions = Vec::new();
        if let Some(outer) = document.select(&self.selectors.instructions_outer).next() {
            if let Some(inner) = outer.select(&self.selectors.instructions_inner).next() {
                for step in inner.select(&self.selectors.instruction_step) {
                    instructions.push(element_text(&step).trim_matches('\n').to_string());
                }
            }
        }
        instructions
    }

    /// Ingredient entries in document order, each passed through the phrase
    /// normalizer. In cleaned mode an entry with no detected noun phrase
    /// contributes nothing, so this list can be shorter than the node count.
    fn extract_ingredients(&self, document: &Html) -> Vec<String> {
        let mut ingredients = Vec::new();
        for node in document.select(&self.selectors.ingredient) {
            ingredients.extend(self.normalizer.normalize(&element_text(&node)));
        }
        ingredients
    }
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}
