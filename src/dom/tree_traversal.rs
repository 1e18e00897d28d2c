use super::*;

impl Dom {
    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        if matches!(self.nodes[node_id.0].node_type, NodeType::Element(_)) {
            out.push(node_id);
        }
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn collect_elements_descendants_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn child_elements(&self, node_id: NodeId) -> Vec<NodeId> {
        self.nodes[node_id.0]
            .children
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    pub(crate) fn first_element_child(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0]
            .children
            .iter()
            .copied()
            .find(|child| self.element(*child).is_some())
    }

    pub(crate) fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|candidate| *candidate == node_id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|sibling| self.element(*sibling).is_some())
    }

    pub(crate) fn next_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = &self.nodes[parent.0].children;
        let pos = siblings.iter().position(|candidate| *candidate == node_id)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|sibling| self.element(*sibling).is_some())
    }

    pub(crate) fn document_element(&self) -> Option<NodeId> {
        self.first_element_child(self.root)
    }

    pub(crate) fn head(&self) -> Option<NodeId> {
        self.html_child("head")
    }

    pub(crate) fn body(&self) -> Option<NodeId> {
        self.html_child("body")
    }

    fn html_child(&self, tag: &str) -> Option<NodeId> {
        let document_element = self.document_element()?;
        if !self
            .tag_name(document_element)
            .is_some_and(|name| name.eq_ignore_ascii_case("html"))
        {
            return None;
        }
        self.child_elements(document_element)
            .into_iter()
            .find(|child| {
                self.tag_name(*child)
                    .is_some_and(|name| name.eq_ignore_ascii_case(tag))
            })
    }

    pub(crate) fn ancestors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node_id), |node| self.parent(*node))
    }

    fn preceding_element_siblings(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.previous_element_sibling(node_id), |node| {
            self.previous_element_sibling(*node)
        })
    }

    /// Matches right to left, backtracking over ancestors and siblings.
    pub(crate) fn matches_selector_chain(&self, node_id: NodeId, parts: &[SelectorPart]) -> bool {
        let Some((last, rest)) = parts.split_last() else {
            return false;
        };
        if !self.matches_step(node_id, &last.step) {
            return false;
        }
        if rest.is_empty() {
            return true;
        }
        match last.combinator.unwrap_or(SelectorCombinator::Descendant) {
            SelectorCombinator::Child => self
                .parent(node_id)
                .is_some_and(|parent| self.matches_selector_chain(parent, rest)),
            SelectorCombinator::Descendant => self
                .ancestors(node_id)
                .any(|ancestor| self.matches_selector_chain(ancestor, rest)),
            SelectorCombinator::AdjacentSibling => self
                .previous_element_sibling(node_id)
                .is_some_and(|sibling| self.matches_selector_chain(sibling, rest)),
            SelectorCombinator::GeneralSibling => self
                .preceding_element_siblings(node_id)
                .any(|sibling| self.matches_selector_chain(sibling, rest)),
        }
    }

    pub(crate) fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        step.tag
            .as_ref()
            .is_none_or(|tag| element.tag_name.eq_ignore_ascii_case(tag))
            && step.id.as_ref().is_none_or(|id| element.attrs.get("id") == Some(id))
            && step
                .classes
                .iter()
                .all(|class_name| has_class(element, class_name))
            && step.attrs.iter().all(|cond| cond.matches(&element.attrs))
            && step
                .pseudo_classes
                .iter()
                .all(|pseudo| self.matches_pseudo_class(node_id, pseudo))
    }

    fn matches_pseudo_class(&self, node_id: NodeId, pseudo: &SelectorPseudoClass) -> bool {
        match pseudo {
            SelectorPseudoClass::FirstChild => self.previous_element_sibling(node_id).is_none(),
            SelectorPseudoClass::LastChild => self.next_element_sibling(node_id).is_none(),
            SelectorPseudoClass::Empty => self.nodes[node_id.0].children.is_empty(),
            SelectorPseudoClass::Not(groups) => !groups
                .iter()
                .any(|chain| self.matches_selector_chain(node_id, chain)),
        }
    }
}
