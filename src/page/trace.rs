use super::*;

impl Page {
    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_state.logs).into()
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_state.to_stderr = enabled;
    }

    /// Toggles the per-listener `[event]` lines while tracing is on.
    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config("trace log limit must be at least 1".into()));
        }
        self.trace_state.set_limit(max_entries);
        Ok(())
    }

    pub(crate) fn trace_event_done(&mut self, event: &EventState, outcome: &str) {
        if !self.trace_state.enabled {
            return;
        }
        let line = format!(
            "[event] done {} target={} current={} outcome={outcome} propagation_stopped={}",
            event.event_type,
            self.trace_node_label(event.target),
            self.trace_node_label(event.current_target),
            event.propagation_stopped,
        );
        self.trace_event_line(line);
    }

    pub(crate) fn trace_event_line(&mut self, line: String) {
        if self.trace_state.events {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        if !self.trace_state.enabled {
            return;
        }
        tracing::trace!(target: "product_carousel::page", "{line}");
        if self.trace_state.to_stderr {
            eprintln!("{line}");
        }
        self.trace_state.record(line);
    }

    /// `#id` when the node has one, otherwise `tag.class.names`.
    pub(crate) fn trace_node_label(&self, node: NodeId) -> String {
        let Some(element) = self.dom.element(node) else {
            return format!("node-{}", node.0);
        };
        if let Some(id) = element.attrs.get("id").filter(|id| !id.is_empty()) {
            return format!("#{id}");
        }
        let classes = class_tokens(element.attrs.get("class").map(String::as_str));
        std::iter::once(element.tag_name.as_str())
            .chain(classes.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}
