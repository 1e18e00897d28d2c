use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
    Includes { key: String, value: String },
}

impl SelectorAttrCondition {
    pub(crate) fn matches(&self, attrs: &HashMap<String, String>) -> bool {
        match self {
            Self::Exists { key } => attrs.contains_key(key),
            Self::Eq { key, value } => attrs.get(key).is_some_and(|attr| attr == value),
            Self::StartsWith { key, value } => attrs
                .get(key)
                .is_some_and(|attr| attr.starts_with(value.as_str())),
            Self::EndsWith { key, value } => attrs
                .get(key)
                .is_some_and(|attr| attr.ends_with(value.as_str())),
            Self::Contains { key, value } => attrs
                .get(key)
                .is_some_and(|attr| attr.contains(value.as_str())),
            Self::Includes { key, value } => attrs
                .get(key)
                .is_some_and(|attr| attr.split_whitespace().any(|token| token == value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorPseudoClass {
    FirstChild,
    LastChild,
    Empty,
    Not(Vec<Vec<SelectorPart>>),
}

/// One compound selector, e.g. `button.favorite-button[data-id]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
    pub(crate) pseudo_classes: Vec<SelectorPseudoClass>,
}

impl SelectorStep {
    /// `Some(id)` for a bare `#id` step.
    pub(crate) fn id_only(&self) -> Option<&str> {
        let bare = !self.universal
            && self.tag.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudo_classes.is_empty();
        if bare { self.id.as_deref() } else { None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    /// How this step relates to the one on its left; `None` for the first.
    pub(crate) combinator: Option<SelectorCombinator>,
}

/// Parses a comma separated selector list. Each group is a chain of steps
/// read left to right.
pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    let mut parser = SelectorParser::new(selector);
    let groups = parser.selector_list()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.unsupported());
    }
    Ok(groups)
}

struct SelectorParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while self.peek().is_some_and(&accept) {
            self.pos += 1;
        }
        &src[start..self.pos]
    }

    fn unsupported(&self) -> Error {
        Error::UnsupportedSelector(self.src.to_string())
    }

    fn selector_list(&mut self) -> Result<Vec<Vec<SelectorPart>>> {
        let mut groups = Vec::new();
        loop {
            self.skip_ws();
            groups.push(self.complex_selector()?);
            self.skip_ws();
            if !self.eat(b',') {
                return Ok(groups);
            }
        }
    }

    fn complex_selector(&mut self) -> Result<Vec<SelectorPart>> {
        let mut parts = vec![SelectorPart {
            step: self.compound_selector()?,
            combinator: None,
        }];
        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(b',' | b')') => return Ok(parts),
                Some(b'>') => SelectorCombinator::Child,
                Some(b'+') => SelectorCombinator::AdjacentSibling,
                Some(b'~') => SelectorCombinator::GeneralSibling,
                Some(_) if had_ws => SelectorCombinator::Descendant,
                Some(_) => return Err(self.unsupported()),
            };
            if combinator != SelectorCombinator::Descendant {
                self.pos += 1;
                self.skip_ws();
            }
            parts.push(SelectorPart {
                step: self.compound_selector()?,
                combinator: Some(combinator),
            });
        }
    }

    fn compound_selector(&mut self) -> Result<SelectorStep> {
        let start = self.pos;
        let mut step = SelectorStep::default();

        if self.eat(b'*') {
            step.universal = true;
        } else {
            let tag = self.ident();
            if !tag.is_empty() {
                step.tag = Some(tag.to_string());
            }
        }

        loop {
            if self.eat(b'#') {
                let id = self.required_ident()?;
                if step.id.replace(id).is_some() {
                    return Err(self.unsupported());
                }
            } else if self.eat(b'.') {
                let class_name = self.required_ident()?;
                step.classes.push(class_name);
            } else if self.eat(b'[') {
                let condition = self.attribute_condition()?;
                step.attrs.push(condition);
            } else if self.eat(b':') {
                let pseudo = self.pseudo_class()?;
                step.pseudo_classes.push(pseudo);
            } else {
                break;
            }
        }

        if self.pos == start {
            return Err(self.unsupported());
        }
        Ok(step)
    }

    fn ident(&mut self) -> &'a str {
        self.take_while(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }

    fn required_ident(&mut self) -> Result<String> {
        let ident = self.ident();
        if ident.is_empty() {
            return Err(self.unsupported());
        }
        Ok(ident.to_string())
    }

    fn attribute_condition(&mut self) -> Result<SelectorAttrCondition> {
        self.skip_ws();
        let key = self
            .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':'))
            .to_ascii_lowercase();
        if key.is_empty() {
            return Err(self.unsupported());
        }
        self.skip_ws();
        if self.eat(b']') {
            return Ok(SelectorAttrCondition::Exists { key });
        }

        let operator = match self.peek() {
            Some(b'=') => b'=',
            Some(op @ (b'^' | b'$' | b'*' | b'~')) => {
                self.pos += 1;
                op
            }
            _ => return Err(self.unsupported()),
        };
        if !self.eat(b'=') {
            return Err(self.unsupported());
        }
        self.skip_ws();
        let value = self.attribute_value()?;
        self.skip_ws();
        if !self.eat(b']') {
            return Err(self.unsupported());
        }

        Ok(match operator {
            b'^' => SelectorAttrCondition::StartsWith { key, value },
            b'$' => SelectorAttrCondition::EndsWith { key, value },
            b'*' => SelectorAttrCondition::Contains { key, value },
            b'~' => SelectorAttrCondition::Includes { key, value },
            _ => SelectorAttrCondition::Eq { key, value },
        })
    }

    fn attribute_value(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let value = self.take_while(|b| b != quote);
                if !self.eat(quote) {
                    return Err(self.unsupported());
                }
                Ok(value.to_string())
            }
            Some(_) => {
                let value = self.take_while(|b| !b.is_ascii_whitespace() && b != b']');
                if value.is_empty() {
                    return Err(self.unsupported());
                }
                Ok(value.to_string())
            }
            None => Err(self.unsupported()),
        }
    }

    fn pseudo_class(&mut self) -> Result<SelectorPseudoClass> {
        let name = self.ident().to_ascii_lowercase();
        match name.as_str() {
            "first-child" => Ok(SelectorPseudoClass::FirstChild),
            "last-child" => Ok(SelectorPseudoClass::LastChild),
            "empty" => Ok(SelectorPseudoClass::Empty),
            "not" if self.eat(b'(') => {
                let inner = self.selector_list()?;
                self.skip_ws();
                if !self.eat(b')') {
                    return Err(self.unsupported());
                }
                Ok(SelectorPseudoClass::Not(inner))
            }
            _ => Err(self.unsupported()),
        }
    }
}
