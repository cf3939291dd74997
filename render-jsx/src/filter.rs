use eval_jsx::JsxElement;
use eval_jsx::JsxFragment;
use eval_jsx::JsxText;
use regex::Regex;
use regex::RegexSet;

/// Rewrites or drops an element before rendering. Returning `None` drops the element and its
/// subtree.
pub trait ElementFilter {
  fn filter(&self, element: JsxElement) -> Option<JsxElement>;
}

pub trait FragmentFilter {
  fn filter(&self, fragment: JsxFragment) -> Option<JsxFragment>;
}

pub trait TextFilter {
  fn filter(&self, text: JsxText) -> Option<JsxText>;
}

impl<F: Fn(JsxElement) -> Option<JsxElement>> ElementFilter for F {
  fn filter(&self, element: JsxElement) -> Option<JsxElement> {
    self(element)
  }
}

impl<F: Fn(JsxFragment) -> Option<JsxFragment>> FragmentFilter for F {
  fn filter(&self, fragment: JsxFragment) -> Option<JsxFragment> {
    self(fragment)
  }
}

impl<F: Fn(JsxText) -> Option<JsxText>> TextFilter for F {
  fn filter(&self, text: JsxText) -> Option<JsxText> {
    self(text)
  }
}

/// Removes every prop whose name matches any of the patterns. Patterns are unanchored, so
/// `^on` strips event handlers and `style` strips anything containing "style".
pub struct DenyAttributeFilter {
  patterns: RegexSet,
}

impl DenyAttributeFilter {
  pub fn new<I, S>(patterns: I) -> Result<DenyAttributeFilter, regex::Error>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Ok(DenyAttributeFilter {
      patterns: RegexSet::new(patterns)?,
    })
  }

  pub fn from_regexes(regexes: &[Regex]) -> Result<DenyAttributeFilter, regex::Error> {
    DenyAttributeFilter::new(regexes.iter().map(Regex::as_str))
  }

  pub fn denies(&self, name: &str) -> bool {
    self.patterns.is_match(name)
  }
}

impl ElementFilter for DenyAttributeFilter {
  fn filter(&self, mut element: JsxElement) -> Option<JsxElement> {
    let denied: Vec<_> = element
      .props
      .keys()
      .filter(|k| self.denies(k))
      .cloned()
      .collect();
    for key in denied {
      element.props.remove(&key);
    }
    Some(element)
  }
}

/// Runs a chain of filters, stopping at the first one that drops the node.
pub(crate) fn apply<T, F: ?Sized>(
  filters: &[Box<F>],
  node: T,
  run: impl Fn(&F, T) -> Option<T>,
) -> Option<T> {
  filters
    .iter()
    .try_fold(node, |node, filter| run(filter.as_ref(), node))
}

#[cfg(test)]
mod tests {
  use super::DenyAttributeFilter;
  use super::ElementFilter;
  use eval_jsx::JsxElement;
  use eval_jsx::PropertyMap;
  use eval_jsx::TagRef;
  use eval_jsx::Value;

  #[test]
  fn deny_filter_strips_matching_props() {
    let mut props = PropertyMap::new();
    props.insert("onClick", Value::Null);
    props.insert("href", Value::string("/"));
    props.insert("onload", Value::Null);
    let element = JsxElement {
      component: TagRef::Name("a".into()),
      props,
      children: Vec::new(),
      loc: None,
    };
    let filter = DenyAttributeFilter::new(["^on"]).unwrap();
    let filtered = filter.filter(element).unwrap();
    let keys: Vec<&str> = filtered.props.keys().map(|k| k.as_ref()).collect();
    assert_eq!(keys, vec!["href"]);
  }

  #[test]
  fn invalid_patterns_are_errors() {
    assert!(DenyAttributeFilter::new(["("]).is_err());
  }
}
