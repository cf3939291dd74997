use crate::options::EvaluateOptions;
use crate::value::Function;

/// Whether the sandbox lets `function` run.
///
/// The deny list always wins. Otherwise a call passes when there is no allow list, when the
/// function is on it, or when user-defined functions are allowed and this is one.
pub fn is_allowed(options: &EvaluateOptions, function: &Function) -> bool {
  if options.denied_functions.iter().any(|f| f.ptr_eq(function)) {
    return false;
  }
  options.allowed_functions.is_empty()
    || options.allowed_functions.iter().any(|f| f.ptr_eq(function))
    || (options.allow_user_defined_function && function.is_user_defined())
}

#[cfg(test)]
mod tests {
  use super::is_allowed;
  use crate::options::EvaluateOptions;
  use crate::value::Function;
  use crate::value::Value;

  fn native(name: &str) -> Function {
    Function::native(name, |_, _, _| Ok(Value::Undefined))
  }

  #[test]
  fn empty_lists_allow_everything() {
    assert!(is_allowed(&EvaluateOptions::default(), &native("f")));
  }

  #[test]
  fn deny_list_wins_over_allow_list() {
    let f = native("f");
    let opts = EvaluateOptions {
      allowed_functions: vec![f.clone()],
      denied_functions: vec![f.clone()],
      ..EvaluateOptions::default()
    };
    assert!(!is_allowed(&opts, &f));
  }

  #[test]
  fn allow_list_compares_identity() {
    let f = native("f");
    let same_name = native("f");
    let opts = EvaluateOptions {
      allowed_functions: vec![f.clone()],
      ..EvaluateOptions::default()
    };
    assert!(is_allowed(&opts, &f));
    assert!(!is_allowed(&opts, &same_name));
  }
}
