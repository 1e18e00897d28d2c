use super::*;

/// The surface the widget renders into and binds listeners on.
pub trait CarouselView {
    /// Appends the carousel for `products` to the mount target.
    fn render(&mut self, products: &[Product], config: &CarouselConfig) -> Result<()>;

    /// Adds `css` to the document once. Returns whether a style element was
    /// inserted by this call.
    fn inject_styles(&mut self, css: &str) -> Result<bool>;

    fn bind_interactions(&mut self, config: &CarouselConfig) -> Result<()>;

    /// Product ids of the rendered cards, in document order.
    fn card_product_ids(&self) -> Result<Vec<String>>;

    /// Sets the favorite marker on every card showing `product_id` and returns
    /// how many cards were updated.
    fn set_favorited(&mut self, product_id: &str, favorited: bool) -> Result<usize>;

    fn click(&mut self, selector: &str) -> Result<Vec<Interaction>>;
}

impl CarouselView for Page {
    fn render(&mut self, products: &[Product], config: &CarouselConfig) -> Result<()> {
        let target = match self.dom.query_selector(&config.mount_selector)? {
            Some(target) => target,
            None => self.dom.body().ok_or_else(|| Error::MountTargetMissing {
                selector: config.mount_selector.clone(),
            })?,
        };
        let root = build_carousel(&mut self.dom, target, products, config);
        self.carousel_roots.push(root);
        self.trace_line(format!(
            "[carousel] rendered {} cards into {}",
            products.len(),
            self.trace_node_label(target)
        ));
        Ok(())
    }

    fn inject_styles(&mut self, css: &str) -> Result<bool> {
        let marker = format!("style[{STYLE_MARKER_ATTR}]");
        if self.dom.query_selector(&marker)?.is_some() {
            return Ok(false);
        }
        let parent = self
            .dom
            .head()
            .or_else(|| self.dom.document_element())
            .or_else(|| self.dom.body())
            .ok_or_else(|| Error::MountTargetMissing {
                selector: "head".into(),
            })?;
        let style = self
            .dom
            .append_element(parent, "style", &[(STYLE_MARKER_ATTR, "")]);
        self.dom.create_text(style, css.to_string());
        Ok(true)
    }

    fn bind_interactions(&mut self, config: &CarouselConfig) -> Result<()> {
        if self.carousel_roots.is_empty() {
            return Err(Error::SelectorNotFound(class_selector(CAROUSEL_CLASS)));
        }
        let card_selector = class_selector(CARD_CLASS);
        for root in self.carousel_roots.clone() {
            let strip = class_selector(STRIP_CLASS);
            if self.dom.query_selector_from(root, &strip)?.is_none() {
                return Err(Error::SelectorNotFound(strip));
            }

            for card in self.dom.query_selector_all_from(root, &card_selector)? {
                self.add_listener_to(
                    card,
                    "click",
                    ListenerOptions::default(),
                    Handler::NavigateToAttr {
                        attr: CARD_URL_ATTR.into(),
                    },
                );
            }

            for button in self
                .dom
                .query_selector_all_from(root, &class_selector(FAVORITE_CLASS))?
            {
                self.add_listener_to(
                    button,
                    "click",
                    ListenerOptions {
                        capture: false,
                        stop_propagation: true,
                    },
                    Handler::ToggleFavorite {
                        owner: card_selector.clone(),
                        id_attr: CARD_ID_ATTR.into(),
                    },
                );
            }

            for (class_name, direction) in [
                (PREV_CLASS, ScrollDirection::Prev),
                (NEXT_CLASS, ScrollDirection::Next),
            ] {
                let selector = class_selector(class_name);
                let button = self
                    .dom
                    .query_selector_from(root, &selector)?
                    .ok_or(Error::SelectorNotFound(selector))?;
                self.add_listener_to(
                    button,
                    "click",
                    ListenerOptions::default(),
                    Handler::ScrollStrip {
                        scope: class_selector(CAROUSEL_CLASS),
                        strip: strip.clone(),
                        item: card_selector.clone(),
                        direction,
                        items_per_view: config.cards_per_view,
                        gap_px: config.card_gap_px,
                    },
                );
            }
        }
        Ok(())
    }

    fn card_product_ids(&self) -> Result<Vec<String>> {
        let card_selector = class_selector(CARD_CLASS);
        let mut ids = Vec::new();
        for root in &self.carousel_roots {
            for card in self.dom.query_selector_all_from(*root, &card_selector)? {
                if let Some(id) = self.dom.attr(card, CARD_ID_ATTR) {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }

    fn set_favorited(&mut self, product_id: &str, favorited: bool) -> Result<usize> {
        let card_selector = class_selector(CARD_CLASS);
        let button_selector = class_selector(FAVORITE_CLASS);
        let mut updated = 0;
        for root in self.carousel_roots.clone() {
            for card in self.dom.query_selector_all_from(root, &card_selector)? {
                if self.dom.attr(card, CARD_ID_ATTR).as_deref() != Some(product_id) {
                    continue;
                }
                if let Some(button) = self.dom.query_selector_from(card, &button_selector)? {
                    self.dom.class_set(button, FAVORITED_CLASS, favorited)?;
                    updated += 1;
                }
            }
        }
        Ok(updated)
    }

    fn click(&mut self, selector: &str) -> Result<Vec<Interaction>> {
        Page::click(self, selector)
    }
}
