use serde::{Deserialize, Serialize};

/// A point of interest from the tourism dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "Location", alias = "name")]
    pub name: String,
    #[serde(rename = "Category", alias = "category", default)]
    pub category: String,
    #[serde(rename = "Country", alias = "country", default)]
    pub country: String,
    #[serde(
        rename = "Rating",
        alias = "rating",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_rating"
    )]
    pub rating: String,
}

impl Place {
    /// One line of chatbot context, e.g. `- Jeita Grotto (Nature) in Lebanon, Rating: 4.8/5`.
    pub fn context_line(&self) -> String {
        format!("- {} ({}) in {}, Rating: {}/5", self.name, self.category, self.country, self.rating)
    }
}
