//! Product carousel widget.
//!
//! The widget loads a product list (local storage first, network second), renders a
//! horizontally scrollable strip of product cards into a host page, and keeps a set of
//! favorite product ids in local storage.
//!
//! Host pages are modelled by [`Page`], a small deterministic document runtime with a
//! DOM arena, a selector engine and capture/bubble event dispatch. Local storage and the
//! network sit behind the [`Storage`] and [`Fetcher`] traits so every piece can be driven
//! without a browser.
//!
//! ```
//! use product_carousel::{Carousel, CarouselConfig, MemoryStorage, MockFetcher, Page, Result};
//!
//! fn main() -> Result<()> {
//!     let config = CarouselConfig::default();
//!     let mut fetcher = MockFetcher::new();
//!     fetcher.set_json(
//!         &config.endpoint,
//!         r#"[{"id":"1","name":"Lamp","price":120,"img":"https://cdn.test/1.png","url":"https://shop.test/1"}]"#,
//!     );
//!
//!     let mut page = Page::from_html("<html><body><div class='product-detail'></div></body></html>")?;
//!     let mut carousel = Carousel::new(config, MemoryStorage::new(), fetcher)?;
//!     carousel.mount(&mut page)?;
//!
//!     carousel.click(&mut page, ".favorite-button")?;
//!     page.assert_has_class(".favorite-button", "favorited", true)?;
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet};

mod carousel;
mod config;
mod core_dom_utils;
mod dom;
mod error;
mod events;
mod favorites;
mod fetch;
mod html;
mod loader;
mod page;
mod product;
mod runtime_state;
mod selector;
mod storage;

pub use carousel::{CAROUSEL_CSS, Carousel, CarouselView, MountReport, render_markup};
pub use config::{
    CarouselConfig, DEFAULT_CARD_GAP_PX, DEFAULT_CARDS_PER_VIEW, DEFAULT_CURRENCY_SUFFIX,
    DEFAULT_FAVORITES_KEY, DEFAULT_MOUNT_SELECTOR, DEFAULT_PRODUCTS_ENDPOINT,
    DEFAULT_PRODUCTS_KEY, DEFAULT_TITLE,
};
pub use error::{Error, Result};
pub use events::{Handler, ListenerOptions, ScrollDirection};
pub use favorites::{Favorites, is_favorite, read_favorites, toggle_favorite};
#[cfg(feature = "http")]
pub use fetch::HttpFetcher;
pub use fetch::{Fetcher, MockFetcher, Response};
pub use loader::{LoadOutcome, ProductLoader, load_products};
pub use page::{Interaction, Page};
pub use product::{Product, parse_products};
pub use runtime_state::LocationNavigation;
#[cfg(feature = "web")]
pub use storage::WebStorage;
pub use storage::{MemoryStorage, Storage};

pub(crate) use core_dom_utils::*;
pub(crate) use dom::{Dom, Element, NodeId};
pub(crate) use events::{EventState, Listener, ListenerStore};
pub(crate) use html::{is_void_tag, parse_html};
pub(crate) use runtime_state::{LayoutState, TraceState};
pub(crate) use selector::*;

#[cfg(test)]
mod tests;
