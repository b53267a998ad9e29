use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Path to the newline-separated list of page identifiers
    #[serde(default = "default_input_file")]
    pub input_file: String,
    /// Path the serialized output collection is written to
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Whether ingredient phrases are normalized to their core phrase
    #[serde(default)]
    pub clean_ingredients: bool,
    /// Gateway request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Structural locators for each extracted field
    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// CSS locators for every field the extractor pulls out of a page.
///
/// Defaults target the markup layout the harvester was written against; any
/// of them can be overridden to point the extractor at a different layout
/// without touching extraction code.
#[derive(Debug, Deserialize, Clone)]
pub struct SelectorConfig {
    /// Recipe title heading
    #[serde(default = "default_name")]
    pub name: String,
    /// Lead image element
    #[serde(default = "default_image")]
    pub image: String,
    /// Primary source attribute on the image element
    #[serde(default = "default_image_attr")]
    pub image_attr: String,
    /// Fallback source attribute when the primary is missing or empty
    #[serde(default = "default_image_fallback_attr")]
    pub image_fallback_attr: String,
    /// Outer container of the instruction steps
    #[serde(default = "default_instructions_outer")]
    pub instructions_outer: String,
    /// Inner container, searched within the outer one
    #[serde(default = "default_instructions_inner")]
    pub instructions_inner: String,
    /// Individual step paragraphs within the inner container
    #[serde(default = "default_instruction_step")]
    pub instruction_step: String,
    /// Ingredient name nodes
    #[serde(default = "default_ingredient")]
    pub ingredient: String,
    /// Overview / subheading paragraph
    #[serde(default = "default_overview")]
    pub overview: String,
    /// First detail value (preparation or cook time)
    #[serde(default = "default_time")]
    pub time: String,
    /// Aggregate rating element
    #[serde(default = "default_rating")]
    pub rating: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            image: default_image(),
            image_attr: default_image_attr(),
            image_fallback_attr: default_image_fallback_attr(),
            instructions_outer: default_instructions_outer(),
            instructions_inner: default_instructions_inner(),
            instruction_step: default_instruction_step(),
            ingredient: default_ingredient(),
            overview: default_overview(),
            time: default_time(),
            rating: default_rating(),
        }
    }
}

// Default value functions
fn default_input_file() -> String {
    "urls.txt".to_string()
}

fn default_output_file() -> String {
    "recipes.json".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_name() -> String {
    "h1.comp.type--lion.article-heading.mntl-text-block".to_string()
}

fn default_image() -> String {
    "img".to_string()
}

fn default_image_attr() -> String {
    "src".to_string()
}

fn default_image_fallback_attr() -> String {
    "data-src".to_string()
}

fn default_instructions_outer() -> String {
    "div.comp.recipe__steps.mntl-block".to_string()
}

fn default_instructions_inner() -> String {
    "div.comp.recipe__steps-content.mntl-sc-page.mntl-block".to_string()
}

fn default_instruction_step() -> String {
    "p.comp.mntl-sc-block.mntl-sc-block-html".to_string()
}

fn default_ingredient() -> String {
    "span[data-ingredient-name='true']".to_string()
}

fn default_overview() -> String {
    "p.comp.type--dog.article-subheading".to_string()
}

fn default_time() -> String {
    "div.mntl-recipe-details__value".to_string()
}

fn default_rating() -> String {
    "div.comp.type--squirrel-bold.mntl-recipe-review-bar__rating.mntl-text-block".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with HARVEST__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: HARVEST__SELECTORS__NAME
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Environment variables with HARVEST prefix
            // Use double underscore for nested: HARVEST__SELECTORS__NAME
            .add_source(
                Environment::with_prefix("HARVEST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_input_file(), "urls.txt");
        assert_eq!(default_output_file(), "recipes.json");
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_image_attr(), "src");
        assert_eq!(default_image_fallback_attr(), "data-src");
    }

    #[test]
    fn test_selector_config_default_targets_article_layout() {
        let selectors = SelectorConfig::default();
        assert!(selectors.name.starts_with("h1."));
        assert!(selectors.overview.starts_with("p."));
        assert_eq!(selectors.ingredient, "span[data-ingredient-name='true']");
        assert!(selectors.instructions_inner.contains("recipe__steps-content"));
    }

    #[test]
    fn test_app_config_deserializes_with_partial_input() {
        // Only a couple of keys set; everything else must come from defaults
        let cfg: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "clean_ingredients = true\n[selectors]\nname = \"h1.recipe-title\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(cfg.clean_ingredients);
        assert_eq!(cfg.selectors.name, "h1.recipe-title");
        assert_eq!(cfg.selectors.image, "img");
        assert_eq!(cfg.timeout, 30);
        assert_eq!(cfg.output_file, "recipes.json");
    }
}
