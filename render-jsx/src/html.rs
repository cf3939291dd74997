use std::fmt::Write;

/// Decides whether a lowercase tag name would be an unknown HTML element.
pub trait UnknownElementCheck {
  fn is_unknown(&self, tag: &str) -> bool;
}

impl<F: Fn(&str) -> bool> UnknownElementCheck for F {
  fn is_unknown(&self, tag: &str) -> bool {
    self(tag)
  }
}

/// Checks tags against the HTML living standard's element list. Custom element names
/// (containing a hyphen) are known.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardElements;

impl UnknownElementCheck for StandardElements {
  fn is_unknown(&self, tag: &str) -> bool {
    if tag.contains('-') {
      return false;
    }
    KNOWN_ELEMENTS.binary_search(&tag).is_err()
  }
}

// Sorted for binary search.
const KNOWN_ELEMENTS: &[&str] = &[
  "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
  "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
  "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "embed",
  "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
  "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd", "label",
  "legend", "li", "link", "main", "map", "mark", "menu", "meta", "meter", "nav", "noscript",
  "object", "ol", "optgroup", "option", "output", "p", "picture", "pre", "progress", "q", "rp",
  "rt", "ruby", "s", "samp", "script", "search", "section", "select", "slot", "small", "source",
  "span", "strong", "style", "sub", "summary", "sup", "svg", "table", "tbody", "td", "template",
  "textarea", "tfoot", "th", "thead", "time", "title", "tr", "track", "u", "ul", "var", "video",
  "wbr",
];

const VOID_ELEMENTS: &[&str] = &[
  "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
  "wbr",
];

pub fn is_void(tag: &str) -> bool {
  VOID_ELEMENTS.contains(&tag)
}

/// Tag and attribute names are emitted verbatim, so anything that could break out of the
/// markup is rejected.
pub fn is_valid_name(name: &str) -> bool {
  let mut chars = name.chars();
  matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
    && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}

pub fn escape_text(out: &mut String, text: &str) {
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      ch => out.push(ch),
    }
  }
}

pub fn escape_attribute(out: &mut String, value: &str) {
  for ch in value.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '"' => out.push_str("&quot;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      ch => out.push(ch),
    }
  }
}

/// `backgroundColor` becomes `background-color`; custom properties (`--x`) are kept.
pub fn css_property_name(name: &str) -> String {
  if name.starts_with("--") {
    return name.to_string();
  }
  let mut out = String::with_capacity(name.len() + 4);
  for ch in name.chars() {
    if ch.is_ascii_uppercase() {
      let _ = write!(out, "-{}", ch.to_ascii_lowercase());
    } else {
      out.push(ch);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::css_property_name;
  use super::is_valid_name;
  use super::StandardElements;
  use super::UnknownElementCheck;
  use super::KNOWN_ELEMENTS;

  #[test]
  fn known_elements_are_sorted() {
    assert!(KNOWN_ELEMENTS.windows(2).all(|w| w[0] < w[1]));
  }

  #[test]
  fn standard_elements() {
    let check = StandardElements;
    assert!(!check.is_unknown("div"));
    assert!(!check.is_unknown("my-widget"));
    assert!(check.is_unknown("unknown"));
    assert!(check.is_unknown("blink"));
  }

  #[test]
  fn names() {
    assert!(is_valid_name("data-id"));
    assert!(is_valid_name("xlink:href"));
    assert!(!is_valid_name("on\"x"));
    assert!(!is_valid_name("a b"));
    assert!(!is_valid_name(""));
    assert_eq!(css_property_name("backgroundColor"), "background-color");
    assert_eq!(css_property_name("--main-color"), "--main-color");
  }
}
