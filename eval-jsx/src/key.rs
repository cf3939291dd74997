/// Hands out deterministic `key` props that encode an element's position in the tree.
///
/// The generator keeps one counter per open element. `generate` bumps the innermost counter and
/// joins the whole stack, so the first root gets `1`, its first child `1-1`, and so on.
#[derive(Clone, Debug)]
pub struct KeyGenerator {
  prefix: Option<String>,
  counters: Vec<u32>,
}

impl KeyGenerator {
  pub fn new(prefix: Option<String>) -> KeyGenerator {
    KeyGenerator {
      prefix,
      counters: vec![0],
    }
  }

  pub fn generate(&mut self) -> String {
    if let Some(top) = self.counters.last_mut() {
      *top += 1;
    };
    let path = self
      .counters
      .iter()
      .map(|c| c.to_string())
      .collect::<Vec<_>>()
      .join("-");
    match &self.prefix {
      Some(prefix) => format!("{}-{}", prefix, path),
      None => path,
    }
  }

  pub fn open(&mut self) {
    self.counters.push(0);
  }

  pub fn close(&mut self) {
    if self.counters.len() > 1 {
      self.counters.pop();
    };
  }

  pub fn depth(&self) -> usize {
    self.counters.len()
  }
}

#[cfg(test)]
mod tests {
  use super::KeyGenerator;
  use ahash::AHashSet;
  use proptest::prelude::*;

  #[test]
  fn keys_follow_tree_position() {
    let mut keys = KeyGenerator::new(None);
    assert_eq!(keys.generate(), "1");
    keys.open();
    assert_eq!(keys.generate(), "1-1");
    assert_eq!(keys.generate(), "1-2");
    keys.close();
    assert_eq!(keys.generate(), "2");
  }

  #[test]
  fn prefix_is_prepended() {
    let mut keys = KeyGenerator::new(Some("app".into()));
    keys.generate();
    keys.open();
    assert_eq!(keys.generate(), "app-1-1");
  }

  #[derive(Clone, Debug)]
  enum Op {
    Generate,
    Open,
    Close,
  }

  fn run(ops: &[Op]) -> Vec<String> {
    let mut keys = KeyGenerator::new(None);
    let mut out = Vec::new();
    for op in ops {
      match op {
        Op::Generate => out.push(keys.generate()),
        // Elements always generate before opening.
        Op::Open => {
          out.push(keys.generate());
          keys.open();
        }
        Op::Close => keys.close(),
      }
    }
    out
  }

  proptest! {
    #[test]
    fn keys_are_unique_and_deterministic(
      ops in proptest::collection::vec(
        prop_oneof![Just(Op::Generate), Just(Op::Open), Just(Op::Close)],
        0..64,
      )
    ) {
      let first = run(&ops);
      prop_assert_eq!(&first, &run(&ops));
      let unique: AHashSet<&String> = first.iter().collect();
      prop_assert_eq!(unique.len(), first.len());
    }
  }
}
