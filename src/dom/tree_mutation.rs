use super::*;

impl Dom {
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if parent == child || self.is_descendant_of(parent, child) {
            return Err(Error::HtmlParse(
                "cannot append a node into its own subtree".into(),
            ));
        }
        if matches!(self.nodes[child.0].node_type, NodeType::Document) {
            return Err(Error::HtmlParse("cannot append the document node".into()));
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn insert_first_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.append_child(parent, child)?;
        let children = &mut self.nodes[parent.0].children;
        if let Some(last) = children.pop() {
            children.insert(0, last);
        }
        Ok(())
    }

    pub(crate) fn detach(&mut self, node_id: NodeId) {
        let Some(parent) = self.nodes[node_id.0].parent.take() else {
            return;
        };
        self.nodes[parent.0]
            .children
            .retain(|candidate| *candidate != node_id);
    }

    /// Gives a parsed document the `html > head + body` skeleton a browser
    /// parser would produce, moving stray top-level content into the body.
    pub(crate) fn normalize_document_structure(&mut self) -> Result<()> {
        let html = match self.document_element().filter(|node| {
            self.tag_name(*node)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("html"))
        }) {
            Some(html) => html,
            None => {
                let html = self.create_detached_element("html".into());
                let top_level = self.nodes[self.root.0].children.clone();
                self.nodes[self.root.0].children.clear();
                for node in &top_level {
                    self.nodes[node.0].parent = None;
                }
                self.nodes[html.0].parent = Some(self.root);
                self.nodes[self.root.0].children.push(html);
                for node in top_level {
                    self.nodes[node.0].parent = Some(html);
                    self.nodes[html.0].children.push(node);
                }
                html
            }
        };

        let head = match self.child_element_by_tag(html, "head") {
            Some(head) => head,
            None => {
                let head = self.create_detached_element("head".into());
                self.insert_first_child(html, head)?;
                head
            }
        };

        let body = match self.child_element_by_tag(html, "body") {
            Some(body) => body,
            None => {
                let body = self.create_detached_element("body".into());
                self.append_child(html, body)?;
                body
            }
        };

        let strays = self.nodes[html.0]
            .children
            .iter()
            .copied()
            .filter(|child| *child != head && *child != body)
            .collect::<Vec<_>>();
        for stray in strays {
            let keep_in_head = self
                .tag_name(stray)
                .is_some_and(is_head_content_tag);
            let is_blank_text = matches!(
                &self.nodes[stray.0].node_type,
                NodeType::Text(text) if text.trim().is_empty()
            );
            if is_blank_text {
                self.detach(stray);
            } else if keep_in_head {
                self.append_child(head, stray)?;
            } else {
                self.append_child(body, stray)?;
            }
        }

        self.rebuild_id_index();
        Ok(())
    }

    fn child_element_by_tag(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.child_elements(parent).into_iter().find(|child| {
            self.tag_name(*child)
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
        })
    }
}

fn is_head_content_tag(tag: &str) -> bool {
    matches!(
        tag.to_ascii_lowercase().as_str(),
        "title" | "meta" | "link" | "style" | "base"
    )
}
