use super::*;

pub(crate) fn has_class(element: &Element, class_name: &str) -> bool {
    element
        .attrs
        .get("class")
        .is_some_and(|classes| classes.split_whitespace().any(|name| name == class_name))
}

pub(crate) fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .into_iter()
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}

/// Writes `classes` back to the `class` attribute, dropping it when empty.
pub(crate) fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".into(), classes.join(" "));
    }
}

/// Escapes markup characters in text content; `in_attribute` also escapes
/// double quotes.
pub(crate) fn escape_html(value: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        let entity = match ch {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            '"' if in_attribute => "&quot;",
            _ => {
                out.push(ch);
                continue;
            }
        };
        out.push_str(entity);
    }
    out
}

/// `<script>` and `<style>` hold unparsed text.
pub(crate) fn is_raw_text_tag(tag: &str) -> bool {
    ["script", "style"]
        .iter()
        .any(|raw| tag.eq_ignore_ascii_case(raw))
}

pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}

pub(crate) fn attrs_from_pairs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|&(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
