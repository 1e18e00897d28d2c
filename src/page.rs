use super::*;

mod assertions;
mod dispatch;
mod trace;

/// What a fired listener asked the embedding widget to know about.
///
/// Navigation and scrolling are applied by the page itself before the
/// interaction is reported; favorite toggles need storage and are applied by
/// the widget that owns it.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Navigate {
        url: String,
    },
    Scroll {
        direction: ScrollDirection,
        scroll_left: f64,
    },
    ToggleFavorite {
        product_id: String,
    },
}

/// A host page: document tree, listeners, mock layout and location.
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) document_url: String,
    pub(crate) layout: LayoutState,
    pub(crate) navigations: Vec<LocationNavigation>,
    pub(crate) carousel_roots: Vec<NodeId>,
    pub(crate) trace_state: TraceState,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_url("about:blank", html)
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        let dom = parse_html(html)?;
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            document_url: url.to_string(),
            layout: LayoutState::default(),
            navigations: Vec::new(),
            carousel_roots: Vec::new(),
            trace_state: TraceState::default(),
        })
    }

    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    /// Dispatches a `click` on the first element matching `selector`.
    pub fn click(&mut self, selector: &str) -> Result<Vec<Interaction>> {
        self.dispatch(selector, "click")
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<Vec<Interaction>> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, event)
    }

    /// Registers `handler` on every element matching `selector` and returns how
    /// many elements received it.
    pub fn add_listener(
        &mut self,
        selector: &str,
        event: &str,
        options: ListenerOptions,
        handler: Handler,
    ) -> Result<usize> {
        let targets = self.dom.query_selector_all(selector)?;
        for target in &targets {
            self.add_listener_to(*target, event, options, handler.clone());
        }
        Ok(targets.len())
    }

    pub(crate) fn add_listener_to(
        &mut self,
        target: NodeId,
        event: &str,
        options: ListenerOptions,
        handler: Handler,
    ) {
        self.listeners
            .add(target, event.to_string(), Listener { options, handler });
    }

    pub fn listener_count(&self, selector: &str, event: &str) -> Result<usize> {
        let target = self.select_one(selector)?;
        Ok(self.listeners.count(target, event))
    }

    pub fn set_default_offset_width(&mut self, width: f64) -> Result<()> {
        validate_width(width)?;
        self.layout.default_offset_width = width;
        Ok(())
    }

    pub fn set_offset_width(&mut self, selector: &str, width: f64) -> Result<()> {
        validate_width(width)?;
        let target = self.select_one(selector)?;
        self.layout.offset_widths.insert(target, width);
        Ok(())
    }

    pub fn offset_width(&self, selector: &str) -> Result<f64> {
        let target = self.select_one(selector)?;
        Ok(self.layout.offset_width(target))
    }

    pub fn scroll_left(&self, selector: &str) -> Result<f64> {
        let target = self.select_one(selector)?;
        Ok(self.layout.scroll_left(target))
    }

    pub fn take_location_navigations(&mut self) -> Vec<LocationNavigation> {
        std::mem::take(&mut self.navigations)
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        let target = self.select_one(selector)?;
        Ok(self.dom.attr(target, name))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        self.dom.class_contains(target, class_name)
    }

    /// Whether the first element matching `selector` also matches `candidate`.
    pub fn matches(&self, selector: &str, candidate: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        self.dom.matches_selector(target, candidate)
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.dom.query_selector_all(selector)?.len())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.outer_html(target)
    }

    /// Serializes the whole document.
    pub fn to_html(&self) -> String {
        self.dom.dump_node(self.dom.root)
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    pub(crate) fn resolve_location_target_url(&self, href: &str) -> String {
        let resolved = match url::Url::parse(&self.document_url) {
            Ok(base) => base.join(href),
            Err(_) => url::Url::parse(href),
        };
        resolved
            .map(String::from)
            .unwrap_or_else(|_| href.to_string())
    }
}

fn validate_width(width: f64) -> Result<()> {
    if !width.is_finite() || width < 0.0 {
        return Err(Error::Config(format!(
            "offset width must be a finite, non-negative number (got {width})"
        )));
    }
    Ok(())
}
