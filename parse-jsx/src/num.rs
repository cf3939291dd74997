fn split_radix(body: &str) -> (u32, &str) {
  match body.get(..2) {
    Some("0x" | "0X") => (16, &body[2..]),
    Some("0o" | "0O") => (8, &body[2..]),
    Some("0b" | "0B") => (2, &body[2..]),
    _ => (10, body),
  }
}

fn strip_separators(digits: &str) -> Option<String> {
  let mut out = String::with_capacity(digits.len());
  let mut prev_sep = false;
  for ch in digits.chars() {
    if ch == '_' {
      // Separators must sit between two digits.
      if prev_sep || out.is_empty() {
        return None;
      }
      prev_sep = true;
      continue;
    }
    out.push(ch);
    prev_sep = false;
  }
  if prev_sep {
    return None;
  }
  Some(out)
}

/// Parses the raw text of a numeric literal token, including radix prefixes, numeric separators,
/// and legacy octal forms such as `017`.
pub fn parse_number_literal(raw: &str) -> Option<f64> {
  let (radix, digits) = split_radix(raw);
  let digits = strip_separators(digits)?;
  if radix != 10 {
    if digits.is_empty() {
      return None;
    }
    let mut value = 0f64;
    for ch in digits.chars() {
      value = value * radix as f64 + ch.to_digit(radix)? as f64;
    }
    return Some(value);
  }
  if digits.len() > 1 && digits.starts_with('0') && digits.chars().all(|c| c.is_ascii_digit()) {
    // Legacy octal unless a non-octal digit appears, in which case it is decimal with a leading zero.
    if digits.chars().all(|c| ('0'..='7').contains(&c)) {
      let mut value = 0f64;
      for ch in digits.chars() {
        value = value * 8.0 + ch.to_digit(8)? as f64;
      }
      return Some(value);
    }
  }
  digits.parse::<f64>().ok()
}

/// Converts the raw text of a BigInt literal (with its `n` suffix) into canonical decimal digits.
pub fn normalise_bigint_literal(raw: &str) -> Option<String> {
  let body = raw.strip_suffix('n')?;
  let (radix, digits) = split_radix(body);
  let digits = strip_separators(digits)?;
  if digits.is_empty() {
    return None;
  }
  // Little-endian base 10 digits.
  let mut decimal: Vec<u32> = vec![0];
  for ch in digits.chars() {
    let mut carry = ch.to_digit(radix)?;
    for d in decimal.iter_mut() {
      let v = *d * radix + carry;
      *d = v % 10;
      carry = v / 10;
    }
    while carry > 0 {
      decimal.push(carry % 10);
      carry /= 10;
    }
  }
  while decimal.len() > 1 && decimal.last() == Some(&0) {
    decimal.pop();
  }
  Some(
    decimal
      .iter()
      .rev()
      .filter_map(|d| char::from_digit(*d, 10))
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_number_literal() {
    assert_eq!(parse_number_literal("42"), Some(42.0));
    assert_eq!(parse_number_literal("1.5e3"), Some(1500.0));
    assert_eq!(parse_number_literal(".25"), Some(0.25));
    assert_eq!(parse_number_literal("0x1F"), Some(31.0));
    assert_eq!(parse_number_literal("0b101"), Some(5.0));
    assert_eq!(parse_number_literal("0o17"), Some(15.0));
    assert_eq!(parse_number_literal("017"), Some(15.0));
    assert_eq!(parse_number_literal("019"), Some(19.0));
    assert_eq!(parse_number_literal("1_000_000"), Some(1_000_000.0));
    assert_eq!(parse_number_literal("1__0"), None);
    assert_eq!(parse_number_literal("10_"), None);
  }

  #[test]
  fn test_normalise_bigint_literal() {
    assert_eq!(normalise_bigint_literal("10n").as_deref(), Some("10"));
    assert_eq!(normalise_bigint_literal("0xFFn").as_deref(), Some("255"));
    assert_eq!(normalise_bigint_literal("0b1_0n").as_deref(), Some("2"));
    assert_eq!(normalise_bigint_literal("10"), None);
  }
}
