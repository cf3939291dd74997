use crate::builtins;
use crate::map::PropertyMap;
use crate::value::Function;
use crate::value::Value;
use serde::Deserialize;
use serde::Deserializer;
use std::fmt;

/// Settings for one `evaluate`/`evaluate_jsx` call.
///
/// Deserializes from camelCase JSON. The function lists hold identities, so they can only be
/// filled in from Rust.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluateOptions {
  /// Variables visible to the script, seeded into the binding frame.
  #[serde(deserialize_with = "json_values")]
  pub binding: PropertyMap<Value>,
  /// Tag name to component lookups, consulted before `binding`.
  #[serde(deserialize_with = "json_values")]
  pub components: PropertyMap<Value>,
  pub key_prefix: Option<String>,
  pub disable_key_generation: bool,
  pub disable_search_components_by_binding: bool,
  /// Calls, `new`, and tagged templates evaluate to `undefined` without running.
  pub disable_call: bool,
  pub disable_new: bool,
  pub raise_reference_error: bool,
  pub allow_user_defined_function: bool,
  /// Log parse and evaluation timings.
  pub debug: bool,
  #[serde(skip)]
  pub allowed_functions: Vec<Function>,
  #[serde(skip)]
  pub denied_functions: Vec<Function>,
}

impl EvaluateOptions {
  pub fn bind(mut self, name: &str, value: impl Into<Value>) -> Self {
    self.binding.insert(name, value.into());
    self
  }

  pub fn component(mut self, name: &str, value: impl Into<Value>) -> Self {
    self.components.insert(name, value.into());
    self
  }

  /// Adds the intrinsic globals (`Math`, `JSON`, `Array`, ...) without overriding existing
  /// bindings.
  pub fn with_builtins(mut self) -> Self {
    for (name, value) in builtins::globals() {
      if !self.binding.contains_key(&name) {
        self.binding.insert(name, value);
      }
    }
    self
  }
}

impl fmt::Debug for EvaluateOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EvaluateOptions")
      .field("binding", &self.binding.keys().collect::<Vec<_>>())
      .field("components", &self.components.keys().collect::<Vec<_>>())
      .field("key_prefix", &self.key_prefix)
      .field("disable_key_generation", &self.disable_key_generation)
      .field(
        "disable_search_components_by_binding",
        &self.disable_search_components_by_binding,
      )
      .field("disable_call", &self.disable_call)
      .field("disable_new", &self.disable_new)
      .field("raise_reference_error", &self.raise_reference_error)
      .field("allow_user_defined_function", &self.allow_user_defined_function)
      .field("debug", &self.debug)
      .field("allowed_functions", &self.allowed_functions)
      .field("denied_functions", &self.denied_functions)
      .finish()
  }
}

fn json_values<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PropertyMap<Value>, D::Error> {
  let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
  Ok(
    map
      .into_iter()
      .map(|(k, v)| (k, Value::from_json(v)))
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::EvaluateOptions;
  use crate::value::Value;

  #[test]
  fn deserializes_camel_case_json() {
    let opts: EvaluateOptions = serde_json::from_str(
      r#"{ "binding": { "name": "world", "n": [1, 2] }, "keyPrefix": "k", "disableCall": true }"#,
    )
    .unwrap();
    assert_eq!(opts.binding.get("name"), Some(&Value::string("world")));
    assert_eq!(
      opts.binding.get("n").map(|v| v.to_json()),
      Some(serde_json::json!([1, 2]))
    );
    assert_eq!(opts.key_prefix.as_deref(), Some("k"));
    assert!(opts.disable_call);
    assert!(!opts.disable_new);
  }
}
