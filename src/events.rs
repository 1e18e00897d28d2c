use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Prev,
    Next,
}

impl ScrollDirection {
    pub(crate) fn sign(self) -> f64 {
        match self {
            Self::Prev => -1.0,
            Self::Next => 1.0,
        }
    }
}

/// What a listener does when it fires. Listeners are plain data; the page
/// interprets them during dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    /// `location.href = currentTarget.getAttribute(attr)`.
    NavigateToAttr { attr: String },
    /// Moves the scroll offset of the `strip` element found inside the
    /// closest `scope` ancestor by `offsetWidth / items_per_view`.
    ScrollStrip {
        scope: String,
        strip: String,
        item: String,
        direction: ScrollDirection,
        items_per_view: f64,
        gap_px: f64,
    },
    /// Reads `id_attr` from the closest `owner` ancestor and reports a
    /// favorite toggle for it.
    ToggleFavorite { owner: String, id_attr: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub capture: bool,
    /// Calls `event.stopPropagation()` after the handler runs.
    pub stop_propagation: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Listener {
    pub(crate) options: ListenerOptions,
    pub(crate) handler: Handler,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: String, listener: Listener) {
        let listeners = self.map.entry(node_id).or_default().entry(event).or_default();
        // addEventListener ignores exact duplicates.
        if !listeners.contains(&listener) {
            listeners.push(listener);
        }
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str, capture: bool) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|listener| listener.options.capture == capture)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, node_id: NodeId, event: &str) -> usize {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) propagation_stopped: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            propagation_stopped: false,
        }
    }
}
