use ahash::AHashMap;
use std::fmt;
use std::rc::Rc;

/// String-keyed map that iterates in insertion order, the order JS exposes for own properties.
#[derive(Clone)]
pub struct PropertyMap<V> {
  entries: Vec<(Rc<str>, V)>,
  index: AHashMap<Rc<str>, usize>,
}

impl<V> Default for PropertyMap<V> {
  fn default() -> Self {
    PropertyMap {
      entries: Vec::new(),
      index: AHashMap::new(),
    }
  }
}

impl<V> PropertyMap<V> {
  pub fn new() -> PropertyMap<V> {
    PropertyMap::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.index.contains_key(key)
  }

  pub fn get(&self, key: &str) -> Option<&V> {
    self.index.get(key).map(|&i| &self.entries[i].1)
  }

  pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
    match self.index.get(key) {
      Some(&i) => Some(&mut self.entries[i].1),
      None => None,
    }
  }

  /// Inserts or replaces. A replaced entry keeps its original position.
  pub fn insert(&mut self, key: impl Into<Rc<str>>, value: V) -> Option<V> {
    let key = key.into();
    if let Some(&i) = self.index.get(&key) {
      return Some(std::mem::replace(&mut self.entries[i].1, value));
    };
    self.index.insert(key.clone(), self.entries.len());
    self.entries.push((key, value));
    None
  }

  pub fn remove(&mut self, key: &str) -> Option<V> {
    let i = self.index.remove(key)?;
    let (_, value) = self.entries.remove(i);
    for (k, _) in self.entries[i..].iter() {
      if let Some(pos) = self.index.get_mut(k) {
        *pos -= 1;
      };
    }
    Some(value)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &V)> {
    self.entries.iter().map(|(k, v)| (k, v))
  }

  pub fn keys(&self) -> impl Iterator<Item = &Rc<str>> {
    self.entries.iter().map(|(k, _)| k)
  }

  pub fn values(&self) -> impl Iterator<Item = &V> {
    self.entries.iter().map(|(_, v)| v)
  }
}

impl<K: Into<Rc<str>>, V> FromIterator<(K, V)> for PropertyMap<V> {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    let mut map = PropertyMap::new();
    for (k, v) in iter {
      map.insert(k, v);
    }
    map
  }
}

impl<V> IntoIterator for PropertyMap<V> {
  type Item = (Rc<str>, V);
  type IntoIter = std::vec::IntoIter<(Rc<str>, V)>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.into_iter()
  }
}

impl<V: fmt::Debug> fmt::Debug for PropertyMap<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(self.iter()).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::PropertyMap;

  #[test]
  fn keeps_insertion_order_across_replace_and_remove() {
    let mut map: PropertyMap<i32> = [("b", 1), ("a", 2), ("c", 3)].into_iter().collect();
    assert_eq!(map.insert("a", 20), Some(2));
    assert_eq!(map.remove("b"), Some(1));
    map.insert("d", 4);
    let keys: Vec<&str> = map.keys().map(|k| k.as_ref()).collect();
    assert_eq!(keys, vec!["a", "c", "d"]);
    assert_eq!(map.get("c"), Some(&3));
    assert_eq!(map.get("b"), None);
    assert_eq!(map.len(), 3);
  }
}
