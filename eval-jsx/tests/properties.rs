use eval_jsx::evaluate_jsx;
use eval_jsx::num::number_to_string;
use eval_jsx::num::string_to_number;
use eval_jsx::EvaluateOptions;
use eval_jsx::JsxNode;
use proptest::prelude::*;
use std::collections::HashSet;

/// Random element trees rendered as JSX source.
fn tree() -> impl Strategy<Value = String> {
  let leaf = prop_oneof![
    Just("<i/>".to_string()),
    "[a-z]{1,4}".prop_map(|s| s),
    (0u8..10).prop_map(|n| format!("{{{}}}", n)),
  ];
  leaf.prop_recursive(4, 32, 4, |inner| {
    (prop::sample::select(vec!["div", "span", ""]), prop::collection::vec(inner, 0..4)).prop_map(
      |(tag, children)| format!("<{}>{}</{}>", tag, children.join(""), tag),
    )
  })
}

fn collect_keys(nodes: &[JsxNode], out: &mut Vec<String>) {
  for node in nodes {
    match node {
      JsxNode::Element(e) => {
        out.extend(e.key().map(str::to_string));
        collect_keys(&e.children, out);
      }
      JsxNode::Fragment(f) => {
        out.extend(f.key().map(str::to_string));
        collect_keys(&f.children, out);
      }
      _ => {}
    }
  }
}

fn keys_of(src: &str) -> Vec<String> {
  let nodes = evaluate_jsx(src, EvaluateOptions::default()).unwrap();
  let mut out = Vec::new();
  collect_keys(&nodes, &mut out);
  out
}

proptest! {
  #[test]
  fn generated_keys_are_unique_and_deterministic(roots in prop::collection::vec(tree(), 1..4)) {
    let src = roots.join("");
    let first = keys_of(&src);
    let unique: HashSet<&String> = first.iter().collect();
    prop_assert_eq!(unique.len(), first.len());
    prop_assert_eq!(keys_of(&src), first);
  }

  #[test]
  fn integers_print_like_rust(n in -(1i64 << 53)..(1i64 << 53)) {
    prop_assert_eq!(number_to_string(n as f64), n.to_string());
  }

  #[test]
  fn finite_numbers_round_trip_through_strings(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
    let s = number_to_string(x);
    prop_assert_eq!(string_to_number(&s), x, "{}", s);
  }
}
