use super::*;
use serde::{Deserialize, Deserializer, Serialize};
use unicode_normalization::UnicodeNormalization;

/// One entry of the product feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub img: String,
    pub url: String,
}

impl Product {
    /// Name in NFC form, as inserted into the page.
    pub fn display_name(&self) -> String {
        self.name.nfc().collect()
    }

    pub fn price_label(&self, currency_suffix: &str) -> String {
        // `-0` prints as "-0" otherwise.
        let price = if self.price == 0.0 { 0.0 } else { self.price };
        format!("{price} {currency_suffix}")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// Parses a product feed body (a JSON array of products).
pub fn parse_products(raw: &str) -> Result<Vec<Product>> {
    serde_json::from_str(raw).map_err(|err| Error::Payload(err.to_string()))
}
