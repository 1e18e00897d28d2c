use super::*;

pub(crate) const CAROUSEL_CLASS: &str = "carousel";
pub(crate) const TITLE_CLASS: &str = "carousel-title";
pub(crate) const STRIP_CLASS: &str = "carousel-inner";
pub(crate) const CARD_CLASS: &str = "product-card";
pub(crate) const IMAGE_CLASS: &str = "product-image";
pub(crate) const NAME_CLASS: &str = "product-name";
pub(crate) const PRICE_CLASS: &str = "product-price";
pub(crate) const FAVORITE_CLASS: &str = "favorite-button";
pub(crate) const FAVORITED_CLASS: &str = "favorited";
pub(crate) const PREV_CLASS: &str = "carousel-prev";
pub(crate) const NEXT_CLASS: &str = "carousel-next";

pub(crate) const CARD_URL_ATTR: &str = "data-url";
pub(crate) const CARD_ID_ATTR: &str = "data-id";
pub(crate) const STYLE_MARKER_ATTR: &str = "data-carousel-styles";

/// U+2764 HEAVY BLACK HEART with the text presentation selector.
pub(crate) const FAVORITE_LABEL: &str = "\u{2764}\u{fe0e}";
pub(crate) const PREV_LABEL: &str = "\u{2190}";
pub(crate) const NEXT_LABEL: &str = "\u{2192}";

pub(crate) fn class_selector(class_name: &str) -> String {
    format!(".{class_name}")
}

/// Appends the carousel subtree as the last child of `parent` and returns its
/// root.
pub(crate) fn build_carousel(
    dom: &mut Dom,
    parent: NodeId,
    products: &[Product],
    config: &CarouselConfig,
) -> NodeId {
    let carousel = dom.append_element(parent, "div", &[("class", CAROUSEL_CLASS)]);

    let title = dom.append_element(carousel, "h2", &[("class", TITLE_CLASS)]);
    dom.create_text(title, config.title.clone());

    let strip = dom.append_element(carousel, "div", &[("class", STRIP_CLASS)]);
    for product in products {
        build_card(dom, strip, product, config);
    }

    let prev = dom.append_element(carousel, "button", &[("class", PREV_CLASS)]);
    dom.create_text(prev, PREV_LABEL.to_string());
    let next = dom.append_element(carousel, "button", &[("class", NEXT_CLASS)]);
    dom.create_text(next, NEXT_LABEL.to_string());

    carousel
}

fn build_card(dom: &mut Dom, strip: NodeId, product: &Product, config: &CarouselConfig) {
    let name = product.display_name();
    let card = dom.append_element(
        strip,
        "div",
        &[
            ("class", CARD_CLASS),
            (CARD_URL_ATTR, product.url.as_str()),
            (CARD_ID_ATTR, product.id.as_str()),
        ],
    );
    dom.append_element(
        card,
        "img",
        &[
            ("src", product.img.as_str()),
            ("alt", name.as_str()),
            ("class", IMAGE_CLASS),
        ],
    );
    let heading = dom.append_element(card, "h3", &[("class", NAME_CLASS)]);
    dom.create_text(heading, name.clone());
    let price = dom.append_element(card, "p", &[("class", PRICE_CLASS)]);
    dom.create_text(price, product.price_label(&config.currency_suffix));
    let favorite = dom.append_element(card, "button", &[("class", FAVORITE_CLASS)]);
    dom.create_text(favorite, FAVORITE_LABEL.to_string());
}

/// Serializes the carousel for `products` without a host page.
pub fn render_markup(products: &[Product], config: &CarouselConfig) -> String {
    let mut dom = Dom::new();
    let root = dom.root;
    let carousel = build_carousel(&mut dom, root, products, config);
    dom.dump_node(carousel)
}
