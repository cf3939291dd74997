use eval_jsx::evaluate_jsx;
use eval_jsx::Component;
use eval_jsx::EvaluateOptions;
use eval_jsx::JsxElement;
use eval_jsx::JsxFragment;
use eval_jsx::JsxNode;
use eval_jsx::JsxText;
use eval_jsx::TagRef;
use pretty_assertions::assert_eq;
use render_jsx::render_to_string;
use render_jsx::DenyAttributeFilter;
use render_jsx::RenderOptions;

fn html(src: &str, options: &RenderOptions) -> String {
  let nodes = evaluate_jsx(src, EvaluateOptions::default()).unwrap();
  render_to_string(&nodes, options)
}

fn html_with(src: &str, eval: EvaluateOptions, options: &RenderOptions) -> String {
  let nodes = evaluate_jsx(src, eval).unwrap();
  render_to_string(&nodes, options)
}

fn drop_tags(element: JsxElement) -> Option<JsxElement> {
  match &element.component {
    TagRef::Name(tag) if matches!(&**tag, "link" | "script") => None,
    _ => Some(element),
  }
}

fn drop_delete_fragments(fragment: JsxFragment) -> Option<JsxFragment> {
  let delete = matches!(
    fragment.children.first(),
    Some(JsxNode::Text(JsxText::String(s))) if &**s == "delete"
  );
  (!delete).then_some(fragment)
}

fn ban_text(text: JsxText) -> Option<JsxText> {
  let banned = matches!(&text, JsxText::String(s) if &**s == "ban");
  (!banned).then_some(text)
}

#[test]
fn renders_attributes() {
  let options = RenderOptions::default();
  assert_eq!(
    html(
      "<label className=\"a\" htmlFor=\"b\" tabIndex={1} hidden onClick={() => 1} data-x={null} draggable={false}>x<br/>y</label>",
      &options
    ),
    "<label class=\"a\" for=\"b\" tabIndex=\"1\" hidden>x<br>y</label>"
  );
  assert_eq!(
    html("<p style={{ fontSize: 12, backgroundColor: 'red' }} />", &options),
    "<p style=\"font-size:12;background-color:red\"></p>"
  );
  assert_eq!(
    html("<a title={'\"<&'}>{'<b>'}</a>", &options),
    "<a title=\"&quot;&lt;&amp;\">&lt;b&gt;</a>"
  );
  assert_eq!(
    html("<p {...{ 'x\"y': 1, ok: 2 }} />", &options),
    "<p ok=\"2\"></p>"
  );
}

#[test]
fn renders_children() {
  let options = RenderOptions::default();
  assert_eq!(html("<p>{1.5}{-0}</p>", &options), "<p>1.50</p>");
  assert_eq!(html("<p>{true}{null}{undefined}</p>", &options), "<p></p>");
  assert_eq!(html("<p>{['a', 'b', 'c']}</p>", &options), "<p>abc</p>");
  assert_eq!(html("<ul><><li>1</li></><li>2</li></ul>", &options), "<ul><li>1</li><li>2</li></ul>");
  assert_eq!(html("<p>a</p><hr/>", &options), "<p>a</p><hr>");
}

#[test]
fn filters_drop_nodes_and_subtrees() {
  let options = RenderOptions {
    disable_unknown_html_element: true,
    ..RenderOptions::default()
  }
  .element_filter(drop_tags)
  .fragment_filter(drop_delete_fragments)
  .text_filter(ban_text);
  let cases = [
    ("", ""),
    ("<p>Hoge</p>", "<p>Hoge</p>"),
    ("<p><>frag</></p>", "<p>frag</p>"),
    ("<p><>delete</></p>", "<p></p>"),
    ("<p><script src=\"./index.js\" /></p>", "<p></p>"),
    ("<p><link href=\"./index\" /></p>", "<p></p>"),
    ("<p><unknown>this is removed</unknown>element</p>", "<p>element</p>"),
    ("<p><b>ban</b>word</p>", "<p><b></b>word</p>"),
  ];
  for (src, expected) in cases {
    assert_eq!(html(src, &options), expected, "{}", src);
  }
}

#[test]
fn deny_attribute_filter() {
  let options = RenderOptions::default()
    .element_filter(DenyAttributeFilter::new(["^on", "^style$"]).unwrap());
  assert_eq!(
    html(
      "<a href=\"/\" onClick=\"x\" onmouseover=\"y\" style={{ color: 'red' }}>go</a>",
      &options
    ),
    "<a href=\"/\">go</a>"
  );
}

#[test]
fn unknown_element_check_is_injectable() {
  let options = RenderOptions {
    disable_unknown_html_element: true,
    unknown_element: Box::new(|tag: &str| tag != "p"),
    ..RenderOptions::default()
  };
  assert_eq!(html("<p><span>x</span>y</p>", &options), "<p>y</p>");
  // Tags are checked case-insensitively.
  assert_eq!(html("<P>z</P>", &options), "<P>z</P>");

  let unchecked = RenderOptions::default();
  assert_eq!(html("<unknown>x</unknown>", &unchecked), "<unknown>x</unknown>");
}

#[test]
fn components_render_through_their_callbacks() {
  let card = Component::with_render("Card", |props, children| {
    let title = props
      .get("title")
      .and_then(|t| t.as_str())
      .unwrap_or_default()
      .to_string();
    let mut out = vec![JsxNode::text(&title), JsxNode::text(": ")];
    out.extend(children.iter().cloned());
    out
  });
  let eval = EvaluateOptions::default()
    .component("Card", card)
    .component("Box", Component::new("Box"));
  assert_eq!(
    html_with(
      "<Card title=\"T\"><b>body</b></Card><Box><i>x</i></Box>",
      eval,
      &RenderOptions::default()
    ),
    "T: <b>body</b><i>x</i>"
  );
}
