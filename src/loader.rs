use super::*;

/// Where the last load got its products from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Cached,
    Fetched,
    /// The fetch failed and an empty list was returned.
    Degraded,
}

/// Cache-or-fetch product loader.
#[derive(Debug, Clone)]
pub struct ProductLoader {
    endpoint: String,
    cache_key: String,
    last_outcome: Option<LoadOutcome>,
}

impl ProductLoader {
    pub fn new(endpoint: impl Into<String>, cache_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            cache_key: cache_key.into(),
            last_outcome: None,
        }
    }

    pub fn from_config(config: &CarouselConfig) -> Self {
        Self::new(config.endpoint.clone(), config.products_key.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    pub fn last_outcome(&self) -> Option<LoadOutcome> {
        self.last_outcome
    }

    /// Returns the cached products when present, otherwise fetches, caches the
    /// raw body and returns the fetched products. Fetch failures degrade to an
    /// empty list; a corrupt cache entry is an error.
    pub fn load<S, F>(&mut self, storage: &mut S, fetcher: &mut F) -> Result<Vec<Product>>
    where
        S: Storage + ?Sized,
        F: Fetcher + ?Sized,
    {
        if let Some(raw) = storage.get_item(&self.cache_key).filter(|raw| !raw.is_empty()) {
            let products = parse_products(&raw).map_err(|err| Error::CorruptCache {
                key: self.cache_key.clone(),
                message: err.to_string(),
            })?;
            tracing::debug!(key = %self.cache_key, count = products.len(), "products loaded from cache");
            self.last_outcome = Some(LoadOutcome::Cached);
            return Ok(products);
        }

        match self.fetch_and_cache(storage, fetcher) {
            Ok(products) => {
                tracing::debug!(endpoint = %self.endpoint, count = products.len(), "products fetched");
                self.last_outcome = Some(LoadOutcome::Fetched);
                Ok(products)
            }
            Err(err) => {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "failed to load products");
                self.last_outcome = Some(LoadOutcome::Degraded);
                Ok(Vec::new())
            }
        }
    }

    fn fetch_and_cache<S, F>(&self, storage: &mut S, fetcher: &mut F) -> Result<Vec<Product>>
    where
        S: Storage + ?Sized,
        F: Fetcher + ?Sized,
    {
        let response = fetcher.get(&self.endpoint)?;
        if !response.ok() {
            return Err(Error::HttpStatus {
                status: response.status,
                url: self.endpoint.clone(),
            });
        }
        let products = parse_products(&response.body)?;
        storage.set_item(&self.cache_key, &response.body)?;
        Ok(products)
    }
}

/// One-shot form of [`ProductLoader::load`].
pub fn load_products<S, F>(
    storage: &mut S,
    fetcher: &mut F,
    config: &CarouselConfig,
) -> Result<Vec<Product>>
where
    S: Storage + ?Sized,
    F: Fetcher + ?Sized,
{
    ProductLoader::from_config(config).load(storage, fetcher)
}
