use super::*;

impl Dom {
    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        self.element(node_id)
            .map(|element| has_class(element, class_name))
            .ok_or_else(|| Error::NotAnElement("classList".into()))
    }

    /// `classList.toggle(name, force)`.
    pub(crate) fn class_set(&mut self, node_id: NodeId, class_name: &str, on: bool) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::NotAnElement("classList".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        let present = classes.iter().any(|name| name == class_name);
        match (on, present) {
            (true, false) => classes.push(class_name.to_string()),
            (false, true) => classes.retain(|name| name != class_name),
            _ => return Ok(()),
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let bare_id = match groups.as_slice() {
            [group] => match group.as_slice() {
                [part] => part.step.id_only(),
                _ => None,
            },
            _ => None,
        };
        if let Some(id) = bare_id {
            return Ok(self.by_id_all(id));
        }
        let mut candidates = Vec::new();
        self.collect_elements_dfs(self.root, &mut candidates);
        Ok(self.retain_matching(candidates, &groups))
    }

    pub(crate) fn query_selector_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all_from(root, selector)?.into_iter().next())
    }

    /// Matches among the descendants of `root`, excluding `root` itself.
    pub(crate) fn query_selector_all_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut candidates = Vec::new();
        self.collect_elements_descendants_dfs(root, &mut candidates);
        Ok(self.retain_matching(candidates, &groups))
    }

    fn matches_any_group(&self, node_id: NodeId, groups: &[Vec<SelectorPart>]) -> bool {
        groups
            .iter()
            .any(|chain| self.matches_selector_chain(node_id, chain))
    }

    fn retain_matching(
        &self,
        mut candidates: Vec<NodeId>,
        groups: &[Vec<SelectorPart>],
    ) -> Vec<NodeId> {
        candidates.retain(|candidate| self.matches_any_group(*candidate, groups));
        candidates
    }

    pub(crate) fn matches_selector(&self, node_id: NodeId, selector: &str) -> Result<bool> {
        let groups = parse_selector_groups(selector)?;
        Ok(self.element(node_id).is_some() && self.matches_any_group(node_id, &groups))
    }

    /// The nearest inclusive ancestor matching `selector`.
    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        Ok(std::iter::successors(Some(node_id), |node| self.parent(*node))
            .take_while(|node| self.element(*node).is_some())
            .find(|node| self.matches_any_group(*node, &groups)))
    }
}
