use super::*;

impl Dom {
    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node_id, &mut out);
        out
    }

    fn collect_text(&self, node_id: NodeId, out: &mut String) {
        match &self.nodes[node_id.0].node_type {
            NodeType::Text(text) => out.push_str(text),
            NodeType::Document | NodeType::Element(_) => {
                for child in &self.nodes[node_id.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    pub(crate) fn outer_html(&self, node_id: NodeId) -> Result<String> {
        match self.element(node_id) {
            Some(_) => Ok(self.dump_node(node_id)),
            None => Err(Error::NotAnElement("outerHTML".into())),
        }
    }

    /// Serializes `node_id` with attributes in name order.
    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node_id, &mut out);
        out
    }

    fn write_node(&self, node_id: NodeId, out: &mut String) {
        let element = match &self.nodes[node_id.0].node_type {
            NodeType::Text(text) => {
                out.push_str(&escape_html(text, false));
                return;
            }
            NodeType::Document => {
                self.write_children(node_id, false, out);
                return;
            }
            NodeType::Element(element) => element,
        };

        let mut attrs = element.attrs.iter().collect::<Vec<_>>();
        attrs.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
        out.push('<');
        out.push_str(&element.tag_name);
        for (name, value) in attrs {
            out.push_str(&format!(" {name}=\"{}\"", escape_html(value, true)));
        }
        out.push('>');
        if is_void_tag(&element.tag_name) {
            return;
        }
        self.write_children(node_id, is_raw_text_tag(&element.tag_name), out);
        out.push_str(&format!("</{}>", element.tag_name));
    }

    fn write_children(&self, node_id: NodeId, raw_text: bool, out: &mut String) {
        for child in &self.nodes[node_id.0].children {
            match &self.nodes[child.0].node_type {
                NodeType::Text(text) if raw_text => out.push_str(text),
                _ => self.write_node(*child, out),
            }
        }
    }
}
