use super::*;

/// Parses a host page into a [`Dom`]. Handles the subset of HTML a page
/// embedding the carousel needs: elements, attributes, text, comments,
/// doctype declarations, void elements and raw `<style>`/`<script>` bodies.
pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let mut open = vec![dom.root];
    let mut lexer = HtmlLexer::new(html);

    while let Some(token) = lexer.next_token()? {
        let parent = open.last().copied().unwrap_or(dom.root);
        match token {
            HtmlToken::Text(text) => {
                let decoded = decode_character_references(text);
                if !decoded.is_empty() {
                    dom.create_text(parent, decoded);
                }
            }
            HtmlToken::EndTag(tag) => {
                // Stray end tags are dropped the way browsers drop them.
                let Some(depth) = open
                    .iter()
                    .skip(1)
                    .rposition(|node| dom.tag_name(*node) == Some(tag.as_str()))
                else {
                    continue;
                };
                open.truncate(depth + 1);
            }
            HtmlToken::StartTag {
                tag,
                attrs,
                self_closing,
            } => {
                let node = dom.create_element(parent, tag.clone(), attrs);
                if self_closing || is_void_tag(&tag) {
                    continue;
                }
                if is_raw_text_tag(&tag) {
                    let body = lexer.raw_text(&tag)?;
                    if !body.is_empty() {
                        dom.create_text(node, body.to_string());
                    }
                    continue;
                }
                open.push(node);
            }
        }
    }

    dom.normalize_document_structure()?;
    Ok(dom)
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

#[derive(Debug)]
enum HtmlToken<'a> {
    StartTag {
        tag: String,
        attrs: HashMap<String, String>,
        self_closing: bool,
    },
    EndTag(String),
    Text(&'a str),
}

struct HtmlLexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> HtmlLexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    /// Steps over the whole character under the cursor.
    fn bump(&mut self) {
        self.pos += self.rest().chars().next().map_or(1, char::len_utf8);
    }

    /// Whether the cursor sits on `<` (after `prefix`) followed by a letter.
    fn at_tag_open(&self, prefix: &str) -> bool {
        self.rest()
            .strip_prefix(prefix)
            .and_then(|name| name.bytes().next())
            .is_some_and(|b| b.is_ascii_alphabetic())
    }

    fn at_self_close(&self) -> bool {
        self.rest().starts_with("/>")
    }

    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while self.peek().is_some_and(&accept) {
            self.pos += 1;
        }
        &src[start..self.pos]
    }

    fn skip_ws(&mut self) {
        self.take_while(|b| b.is_ascii_whitespace());
    }

    /// Moves past the first `needle` at or after the cursor.
    fn skip_past(&mut self, needle: &str, what: &str) -> Result<()> {
        let offset = self
            .rest()
            .find(needle)
            .ok_or_else(|| Error::HtmlParse(format!("unclosed {what}")))?;
        self.pos += offset + needle.len();
        Ok(())
    }

    fn next_token(&mut self) -> Result<Option<HtmlToken<'a>>> {
        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Ok(None);
            }
            if rest.starts_with("<!--") {
                self.pos += 4;
                self.skip_past("-->", "HTML comment")?;
            } else if rest.starts_with("<!") {
                self.skip_past(">", "declaration tag")?;
            } else if self.at_tag_open("</") {
                return self.end_tag().map(|tag| Some(HtmlToken::EndTag(tag)));
            } else if self.at_tag_open("<") {
                return self.start_tag().map(Some);
            } else {
                // A `<` that opens no tag is ordinary text.
                let src = self.src;
                let start = self.pos;
                self.bump();
                self.take_while(|b| b != b'<');
                return Ok(Some(HtmlToken::Text(&src[start..self.pos])));
            }
        }
    }

    fn tag_name(&mut self) -> String {
        self.take_while(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
            .to_ascii_lowercase()
    }

    fn end_tag(&mut self) -> Result<String> {
        self.pos += 2;
        self.skip_ws();
        let tag = self.tag_name();
        self.skip_past(">", "end tag")?;
        Ok(tag)
    }

    fn start_tag(&mut self) -> Result<HtmlToken<'a>> {
        self.pos += 1;
        let tag = self.tag_name();

        let mut attrs = HashMap::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(Error::HtmlParse(format!("unclosed <{tag}> start tag"))),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(HtmlToken::StartTag {
                        tag,
                        attrs,
                        self_closing: false,
                    });
                }
                Some(b'/') if self.at_self_close() => {
                    self.pos += 2;
                    return Ok(HtmlToken::StartTag {
                        tag,
                        attrs,
                        self_closing: true,
                    });
                }
                Some(b) if is_attr_name_byte(b) => {
                    let (name, value) = self.attribute()?;
                    attrs.entry(name).or_insert(value);
                }
                Some(_) => {
                    // Junk inside a tag is skipped rather than failing the page.
                    self.bump();
                    self.unquoted_value();
                }
            }
        }
    }

    fn attribute(&mut self) -> Result<(String, String)> {
        let name = self.take_while(is_attr_name_byte).to_ascii_lowercase();
        self.skip_ws();
        if self.peek() != Some(b'=') {
            return Ok((name, String::new()));
        }
        self.pos += 1;
        self.skip_ws();
        let raw = match self.peek() {
            None => return Err(Error::HtmlParse(format!("missing value for {name}"))),
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let value = self.take_while(|b| b != quote);
                if self.peek() != Some(quote) {
                    return Err(Error::HtmlParse(format!("unclosed value for {name}")));
                }
                self.pos += 1;
                value
            }
            Some(_) => self.unquoted_value(),
        };
        Ok((name, decode_character_references(raw)))
    }

    fn unquoted_value(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() || b == b'>' || self.at_self_close() {
                break;
            }
            self.bump();
        }
        &src[start..self.pos]
    }

    /// Everything up to the matching end tag of a raw text element, which is
    /// consumed as well.
    fn raw_text(&mut self, tag: &str) -> Result<&'a str> {
        let src = self.src;
        let start = self.pos;
        let rest = self.rest().as_bytes();
        let close = (0..rest.len())
            .find(|at| is_end_tag_for(&rest[*at..], tag.as_bytes()))
            .ok_or_else(|| Error::HtmlParse(format!("unclosed <{tag}>")))?;
        self.pos += close;
        self.end_tag()?;
        Ok(&src[start..start + close])
    }
}

fn is_attr_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':')
}

fn is_end_tag_for(input: &[u8], tag: &[u8]) -> bool {
    let Some(name) = input.strip_prefix(b"</") else {
        return false;
    };
    name.get(..tag.len())
        .is_some_and(|candidate| candidate.eq_ignore_ascii_case(tag))
        && name
            .get(tag.len())
            .is_none_or(|b| *b == b'>' || b.is_ascii_whitespace())
}

fn decode_character_references(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp + 1..];
        let decoded = rest
            .split_once(';')
            .and_then(|(reference, tail)| Some((character_reference(reference)?, tail)));
        match decoded {
            Some((ch, tail)) => {
                out.push(ch);
                rest = tail;
            }
            None => out.push('&'),
        }
    }
    out.push_str(rest);
    out
}

fn character_reference(reference: &str) -> Option<char> {
    if let Some(numeric) = reference.strip_prefix('#') {
        let codepoint = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        return char::from_u32(codepoint);
    }
    Some(match reference {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "euro" => '€',
        "hellip" => '…',
        "larr" => '←',
        "rarr" => '→',
        "hearts" => '♥',
        _ => return None,
    })
}
