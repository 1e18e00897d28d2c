use super::*;
use std::collections::VecDeque;

pub(crate) const DEFAULT_OFFSET_WIDTH: f64 = 1280.0;

/// A `location.href` assignment performed by a page listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigation {
    pub from: String,
    pub to: String,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

impl TraceState {
    /// Keeps at most `log_limit` lines, dropping the oldest first.
    pub(crate) fn record(&mut self, line: String) {
        self.logs.push_back(line);
        self.enforce_limit();
    }

    pub(crate) fn set_limit(&mut self, limit: usize) {
        self.log_limit = limit;
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        let excess = self.logs.len().saturating_sub(self.log_limit);
        self.logs.drain(..excess);
    }
}

/// Mock layout metrics. There is no layout engine; widths are whatever the
/// test or host sets, with a viewport-sized default.
#[derive(Debug)]
pub(crate) struct LayoutState {
    pub(crate) default_offset_width: f64,
    pub(crate) offset_widths: HashMap<NodeId, f64>,
    pub(crate) scroll_left: HashMap<NodeId, f64>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self {
            default_offset_width: DEFAULT_OFFSET_WIDTH,
            offset_widths: HashMap::new(),
            scroll_left: HashMap::new(),
        }
    }
}

impl LayoutState {
    pub(crate) fn offset_width(&self, node: NodeId) -> f64 {
        self.offset_widths
            .get(&node)
            .copied()
            .unwrap_or(self.default_offset_width)
    }

    pub(crate) fn scroll_left(&self, node: NodeId) -> f64 {
        self.scroll_left.get(&node).copied().unwrap_or(0.0)
    }
}
