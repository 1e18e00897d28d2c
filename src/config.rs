use super::*;
use serde::Deserialize;

pub const DEFAULT_PRODUCTS_ENDPOINT: &str = "https://gist.githubusercontent.com/sevindi/5765c5812bbc8238a38b3cf52f233651/raw/56261d81af8561bf0a7cf692fe572f9e1e91f372/products.json";
pub const DEFAULT_PRODUCTS_KEY: &str = "products";
pub const DEFAULT_FAVORITES_KEY: &str = "favorites";
pub const DEFAULT_MOUNT_SELECTOR: &str = ".product-detail";
pub const DEFAULT_TITLE: &str = "Beğenebileceğiniz Ürünler";
pub const DEFAULT_CURRENCY_SUFFIX: &str = "TL";
pub const DEFAULT_CARDS_PER_VIEW: f64 = 6.5;
pub const DEFAULT_CARD_GAP_PX: f64 = 10.0;

/// Widget settings. Every field falls back to its default when absent from
/// JSON input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub endpoint: String,
    pub products_key: String,
    pub favorites_key: String,
    pub mount_selector: String,
    pub title: String,
    pub currency_suffix: String,
    pub cards_per_view: f64,
    pub card_gap_px: f64,
    pub http_timeout_ms: Option<u64>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PRODUCTS_ENDPOINT.to_string(),
            products_key: DEFAULT_PRODUCTS_KEY.to_string(),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            mount_selector: DEFAULT_MOUNT_SELECTOR.to_string(),
            title: DEFAULT_TITLE.to_string(),
            currency_suffix: DEFAULT_CURRENCY_SUFFIX.to_string(),
            cards_per_view: DEFAULT_CARDS_PER_VIEW,
            card_gap_px: DEFAULT_CARD_GAP_PX,
            http_timeout_ms: None,
        }
    }
}

impl CarouselConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| Error::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Config("endpoint must not be empty".into()));
        }
        if self.products_key.is_empty() || self.favorites_key.is_empty() {
            return Err(Error::Config("storage keys must not be empty".into()));
        }
        if self.products_key == self.favorites_key {
            return Err(Error::Config(format!(
                "products and favorites cannot share the storage key {}",
                self.products_key
            )));
        }
        parse_selector_groups(&self.mount_selector)?;
        if !self.cards_per_view.is_finite() || self.cards_per_view <= 0.0 {
            return Err(Error::Config(format!(
                "cards_per_view must be a finite number above zero (got {})",
                self.cards_per_view
            )));
        }
        if !self.card_gap_px.is_finite() || self.card_gap_px < 0.0 {
            return Err(Error::Config(format!(
                "card_gap_px must be a finite, non-negative number (got {})",
                self.card_gap_px
            )));
        }
        if self.http_timeout_ms == Some(0) {
            return Err(Error::Config("http_timeout_ms must be at least 1".into()));
        }
        Ok(())
    }

    pub fn set_cards_per_view(&mut self, cards_per_view: f64) -> Result<()> {
        let previous = std::mem::replace(&mut self.cards_per_view, cards_per_view);
        self.validate().inspect_err(|_| self.cards_per_view = previous)
    }

    pub fn set_card_gap_px(&mut self, card_gap_px: f64) -> Result<()> {
        let previous = std::mem::replace(&mut self.card_gap_px, card_gap_px);
        self.validate().inspect_err(|_| self.card_gap_px = previous)
    }

    pub fn set_mount_selector(&mut self, selector: &str) -> Result<()> {
        parse_selector_groups(selector)?;
        self.mount_selector = selector.to_string();
        Ok(())
    }
}
