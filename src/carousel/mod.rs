use super::*;

mod markup;
mod styles;
mod view;

pub(crate) use markup::*;
pub use markup::render_markup;
pub use styles::CAROUSEL_CSS;
pub use view::CarouselView;

/// Summary of one [`Carousel::mount`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountReport {
    pub product_count: usize,
    pub outcome: LoadOutcome,
    pub styles_injected: bool,
    /// Cards whose favorite button ended up marked.
    pub favorited_cards: usize,
}

/// The product carousel widget: owns the configuration, local storage and
/// the network client, and drives a [`CarouselView`].
#[derive(Debug)]
pub struct Carousel<S, F> {
    config: CarouselConfig,
    storage: S,
    fetcher: F,
    loader: ProductLoader,
    favorites: Favorites,
    products: Vec<Product>,
}

impl<S: Storage, F: Fetcher> Carousel<S, F> {
    pub fn new(config: CarouselConfig, storage: S, fetcher: F) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            loader: ProductLoader::from_config(&config),
            favorites: Favorites::new(config.favorites_key.clone()),
            config,
            storage,
            fetcher,
            products: Vec::new(),
        })
    }

    /// Loads products, renders them, injects the stylesheet, binds listeners
    /// and restores favorite markers, in that order.
    pub fn mount<V: CarouselView + ?Sized>(&mut self, view: &mut V) -> Result<MountReport> {
        let products = self.loader.load(&mut self.storage, &mut self.fetcher)?;
        let outcome = self.loader.last_outcome().unwrap_or(LoadOutcome::Degraded);

        view.render(&products, &self.config)?;
        let styles_injected = view.inject_styles(CAROUSEL_CSS)?;
        view.bind_interactions(&self.config)?;
        self.products = products;
        let favorited_cards = self.sync_favorites(view)?;

        tracing::debug!(
            products = self.products.len(),
            ?outcome,
            styles_injected,
            favorited_cards,
            "carousel mounted"
        );
        Ok(MountReport {
            product_count: self.products.len(),
            outcome,
            styles_injected,
            favorited_cards,
        })
    }

    /// Marks each rendered card's favorite button iff its id is stored as a
    /// favorite. Returns the number of marked cards.
    pub fn sync_favorites<V: CarouselView + ?Sized>(&self, view: &mut V) -> Result<usize> {
        let favorites = self.favorites.read(&self.storage)?;
        let mut seen = HashSet::new();
        let mut marked = 0;
        for id in view.card_product_ids()? {
            if !seen.insert(id.clone()) {
                continue;
            }
            let favorited = favorites.contains(&id);
            let updated = view.set_favorited(&id, favorited)?;
            if favorited {
                marked += updated;
            }
        }
        Ok(marked)
    }

    /// Clicks `selector` on the view and applies the resulting interactions.
    pub fn click<V: CarouselView + ?Sized>(
        &mut self,
        view: &mut V,
        selector: &str,
    ) -> Result<Vec<Interaction>> {
        let interactions = view.click(selector)?;
        self.apply(view, &interactions)?;
        Ok(interactions)
    }

    /// Applies interactions that need the widget's storage.
    pub fn apply<V: CarouselView + ?Sized>(
        &mut self,
        view: &mut V,
        interactions: &[Interaction],
    ) -> Result<()> {
        for interaction in interactions {
            if let Interaction::ToggleFavorite { product_id } = interaction {
                let favorited = self.favorites.toggle(&mut self.storage, product_id)?;
                view.set_favorited(product_id, favorited)?;
            }
        }
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn favorites(&self) -> Result<Vec<String>> {
        self.favorites.read(&self.storage)
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn loader(&self) -> &ProductLoader {
        &self.loader
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn fetcher_mut(&mut self) -> &mut F {
        &mut self.fetcher
    }

    pub fn into_parts(self) -> (S, F) {
        (self.storage, self.fetcher)
    }
}
