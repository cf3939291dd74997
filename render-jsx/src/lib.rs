//! Renders the node trees produced by `eval-jsx` to HTML text.
//!
//! ```
//! use eval_jsx::{evaluate_jsx, EvaluateOptions};
//! use render_jsx::{render_to_string, RenderOptions};
//!
//! let nodes = evaluate_jsx("<p className=\"x\">{'a < b'}</p>", EvaluateOptions::default()).unwrap();
//! assert_eq!(render_to_string(&nodes, &RenderOptions::default()), "<p class=\"x\">a &lt; b</p>");
//! ```

mod filter;
mod html;
mod render;

pub use filter::DenyAttributeFilter;
pub use filter::ElementFilter;
pub use filter::FragmentFilter;
pub use filter::TextFilter;
pub use html::StandardElements;
pub use html::UnknownElementCheck;

use eval_jsx::JsxNode;
use render::Renderer;
use tracing::debug_span;

pub struct RenderOptions {
  /// Drop elements whose tag `unknown_element` does not recognise, with their subtrees.
  pub disable_unknown_html_element: bool,
  pub element_filters: Vec<Box<dyn ElementFilter>>,
  pub fragment_filters: Vec<Box<dyn FragmentFilter>>,
  pub text_filters: Vec<Box<dyn TextFilter>>,
  pub unknown_element: Box<dyn UnknownElementCheck>,
}

impl Default for RenderOptions {
  fn default() -> RenderOptions {
    RenderOptions {
      disable_unknown_html_element: false,
      element_filters: Vec::new(),
      fragment_filters: Vec::new(),
      text_filters: Vec::new(),
      unknown_element: Box::new(StandardElements),
    }
  }
}

impl RenderOptions {
  pub fn element_filter(mut self, filter: impl ElementFilter + 'static) -> RenderOptions {
    self.element_filters.push(Box::new(filter));
    self
  }

  pub fn fragment_filter(mut self, filter: impl FragmentFilter + 'static) -> RenderOptions {
    self.fragment_filters.push(Box::new(filter));
    self
  }

  pub fn text_filter(mut self, filter: impl TextFilter + 'static) -> RenderOptions {
    self.text_filters.push(Box::new(filter));
    self
  }
}

pub fn render_to_string(nodes: &[JsxNode], options: &RenderOptions) -> String {
  let _span = debug_span!("render", roots = nodes.len()).entered();
  let mut renderer = Renderer {
    options,
    out: String::new(),
  };
  renderer.nodes(nodes);
  renderer.out
}
