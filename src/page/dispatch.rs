use super::*;

impl Page {
    pub(crate) fn dispatch_event(
        &mut self,
        target: NodeId,
        event_type: &str,
    ) -> Result<Vec<Interaction>> {
        let mut event = EventState::new(event_type, target);
        let mut interactions = Vec::new();

        // Root first; the target itself is not part of the path.
        let mut path = self.dom.ancestors(target).collect::<Vec<_>>();
        path.reverse();
        let phases = path
            .iter()
            .map(|node| (*node, true))
            .chain([(target, true), (target, false)])
            .chain(path.iter().rev().map(|node| (*node, false)))
            .collect::<Vec<_>>();

        for (node, capture) in phases {
            event.current_target = node;
            self.invoke_listeners(node, &mut event, capture, &mut interactions)?;
            if event.propagation_stopped {
                self.trace_event_done(&event, "propagation_stopped");
                return Ok(interactions);
            }
        }

        self.trace_event_done(&event, "completed");
        Ok(interactions)
    }

    fn invoke_listeners(
        &mut self,
        node_id: NodeId,
        event: &mut EventState,
        capture: bool,
        interactions: &mut Vec<Interaction>,
    ) -> Result<()> {
        let listeners = self.listeners.get(node_id, &event.event_type, capture);
        for listener in listeners {
            if self.trace_state.enabled {
                let line = format!(
                    "[event] {} target={} current={} phase={}",
                    event.event_type,
                    self.trace_node_label(event.target),
                    self.trace_node_label(event.current_target),
                    if capture { "capture" } else { "bubble" },
                );
                self.trace_event_line(line);
            }
            if let Some(interaction) = self.run_handler(&listener.handler, event)? {
                interactions.push(interaction);
            }
            // Sibling listeners on the same node still run.
            if listener.options.stop_propagation {
                event.propagation_stopped = true;
            }
        }
        Ok(())
    }

    fn run_handler(&mut self, handler: &Handler, event: &EventState) -> Result<Option<Interaction>> {
        match handler {
            Handler::NavigateToAttr { attr } => {
                let Some(href) = self.dom.attr(event.current_target, attr) else {
                    self.trace_event_line(format!(
                        "[event] navigation skipped: {} has no {attr}",
                        self.trace_node_label(event.current_target)
                    ));
                    return Ok(None);
                };
                let url = self.navigate(&href);
                Ok(Some(Interaction::Navigate { url }))
            }
            Handler::ScrollStrip {
                scope,
                strip,
                item,
                direction,
                items_per_view,
                gap_px,
            } => {
                let root = self
                    .dom
                    .closest(event.current_target, scope)?
                    .unwrap_or(self.dom.root);
                let strip_node = self
                    .dom
                    .query_selector_from(root, strip)?
                    .ok_or_else(|| Error::SelectorNotFound(strip.clone()))?;
                let item_count = self.dom.query_selector_all_from(strip_node, item)?.len();

                let width = self.layout.offset_width(strip_node);
                let step = width / items_per_view;
                let scroll_width =
                    item_count as f64 * step + item_count.saturating_sub(1) as f64 * gap_px;
                let max_scroll = (scroll_width - width).max(0.0);
                let scroll_left = (self.layout.scroll_left(strip_node) + direction.sign() * step)
                    .clamp(0.0, max_scroll);
                self.layout.scroll_left.insert(strip_node, scroll_left);

                Ok(Some(Interaction::Scroll {
                    direction: *direction,
                    scroll_left,
                }))
            }
            Handler::ToggleFavorite { owner, id_attr } => {
                let product_id = self
                    .dom
                    .closest(event.current_target, owner)?
                    .and_then(|card| self.dom.attr(card, id_attr))
                    .ok_or_else(|| Error::SelectorNotFound(format!("{owner}[{id_attr}]")))?;
                Ok(Some(Interaction::ToggleFavorite { product_id }))
            }
        }
    }

    fn navigate(&mut self, href: &str) -> String {
        let to = self.resolve_location_target_url(href);
        let from = std::mem::replace(&mut self.document_url, to.clone());
        tracing::debug!(%from, %to, "page navigation");
        self.navigations.push(LocationNavigation {
            from,
            to: to.clone(),
        });
        to
    }
}
