use serde::{Deserialize, Serialize};

/// One harvested recipe, as it appears in the output collection.
///
/// `time` and `rating` serialize as `null` when the page carried no such
/// element; `image_url` is always a string, empty when no usable source
/// attribute was found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Dense sequential id, assigned in build order starting at 0
    pub id: u64,
    pub name: String,
    pub ingredients: Vec<String>,
    pub url: String,
    pub time: Option<String>,
    pub rating: Option<String>,
    pub image_url: String,
    pub instructions: Vec<String>,
    pub overview: String,
}

/// Everything the field extractor pulls out of one page; a [`Recipe`]
/// minus its id.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    pub name: String,
    pub ingredients: Vec<String>,
    pub url: String,
    pub time: Option<String>,
    pub rating: Option<String>,
    pub image_url: String,
    pub instructions: Vec<String>,
    pub overview: String,
}

impl Recipe {
    /// Assemble the output record from an id and the extracted fields.
    pub fn assemble(id: u64, fields: ExtractedFields) -> Self {
        Recipe {
            id,
            name: fields.name,
            ingredients: fields.ingredients,
            url: fields.url,
            time: fields.time,
            rating: fields.rating,
            image_url: fields.image_url,
            instructions: fields.instructions,
            overview: fields.overview,
        }
    }
}
