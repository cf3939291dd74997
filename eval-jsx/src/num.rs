//! Conversions between numbers and strings following ECMA-262 `Number::toString` and
//! `StringToNumber`.

pub fn number_to_string(x: f64) -> String {
  if x.is_nan() {
    return "NaN".into();
  }
  if x == 0.0 {
    return "0".into();
  }
  if x.is_infinite() {
    return if x > 0.0 { "Infinity" } else { "-Infinity" }.into();
  }
  if x < 0.0 {
    return format!("-{}", number_to_string(-x));
  }

  // `{:e}` yields the shortest round-tripping digits, e.g. `1.2345e3`.
  let sci = format!("{:e}", x);
  let Some((mantissa, exp)) = sci.split_once('e') else {
    return sci;
  };
  let exp: i32 = exp.parse().unwrap_or(0);
  let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
  let k = digits.len() as i32;
  let n = exp + 1;

  if k <= n && n <= 21 {
    format!("{}{}", digits, "0".repeat((n - k) as usize))
  } else if 0 < n && n <= 21 {
    let (int, frac) = digits.split_at(n as usize);
    format!("{}.{}", int, frac)
  } else if -6 < n && n <= 0 {
    format!("0.{}{}", "0".repeat((-n) as usize), digits)
  } else {
    let e = n - 1;
    let sign = if e >= 0 { '+' } else { '-' };
    let (first, rest) = digits.split_at(1);
    if rest.is_empty() {
      format!("{}e{}{}", first, sign, e.abs())
    } else {
      format!("{}.{}e{}{}", first, rest, sign, e.abs())
    }
  }
}

/// `Number.prototype.toString(radix)` for radixes other than 10.
pub fn number_to_radix_string(x: f64, radix: u32) -> String {
  if radix == 10 || !x.is_finite() {
    return number_to_string(x);
  }
  let negative = x < 0.0;
  let x = x.abs();
  let mut int = x.trunc();
  let mut frac = x - int;

  let mut int_digits = Vec::new();
  if int == 0.0 {
    int_digits.push('0');
  }
  while int >= 1.0 {
    let digit = (int % radix as f64) as u32;
    int_digits.push(std::char::from_digit(digit, radix).unwrap_or('0'));
    int = (int / radix as f64).trunc();
  }
  int_digits.reverse();

  let mut out: String = int_digits.into_iter().collect();
  if frac > 0.0 {
    out.push('.');
    for _ in 0..52 {
      frac *= radix as f64;
      let digit = frac.trunc() as u32;
      out.push(std::char::from_digit(digit, radix).unwrap_or('0'));
      frac -= digit as f64;
      if frac <= 0.0 {
        break;
      }
    }
  }
  if negative {
    out.insert(0, '-');
  }
  out
}

pub fn string_to_number(raw: &str) -> f64 {
  let trimmed = raw.trim_matches(is_ecma_whitespace);
  if trimmed.is_empty() {
    return 0.0;
  }
  match trimmed {
    "Infinity" | "+Infinity" => return f64::INFINITY,
    "-Infinity" => return f64::NEG_INFINITY,
    _ => {}
  }
  if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
    return parse_int_radix(hex, 16).unwrap_or(f64::NAN);
  }
  if let Some(oct) = trimmed.strip_prefix("0o").or_else(|| trimmed.strip_prefix("0O")) {
    return parse_int_radix(oct, 8).unwrap_or(f64::NAN);
  }
  if let Some(bin) = trimmed.strip_prefix("0b").or_else(|| trimmed.strip_prefix("0B")) {
    return parse_int_radix(bin, 2).unwrap_or(f64::NAN);
  }
  // Rust also accepts spellings such as `inf` and `nan`; JS only accepts decimal literals here.
  let decimal = trimmed
    .bytes()
    .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
  if !decimal {
    return f64::NAN;
  }
  trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn parse_int_radix(s: &str, radix: u32) -> Option<f64> {
  if s.is_empty() {
    return None;
  }
  let mut value = 0.0f64;
  for c in s.chars() {
    let digit = c.to_digit(radix)?;
    value = value * radix as f64 + digit as f64;
  }
  Some(value)
}

/// Global `parseInt`: parses the longest valid prefix.
pub fn parse_int(raw: &str, radix: Option<u32>) -> f64 {
  let s = raw.trim_start_matches(is_ecma_whitespace);
  let (negative, s) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };
  let (radix, s) = match radix {
    None | Some(16) if s.starts_with("0x") || s.starts_with("0X") => (16, &s[2..]),
    None => (10, s),
    Some(r) if (2..=36).contains(&r) => (r, s),
    Some(_) => return f64::NAN,
  };
  let end = s
    .char_indices()
    .find(|(_, c)| c.to_digit(radix).is_none())
    .map(|(i, _)| i)
    .unwrap_or(s.len());
  match parse_int_radix(&s[..end], radix) {
    Some(v) if negative => -v,
    Some(v) => v,
    None => f64::NAN,
  }
}

/// Global `parseFloat`: parses the longest decimal literal prefix.
pub fn parse_float(raw: &str) -> f64 {
  let s = raw.trim_start_matches(is_ecma_whitespace);
  let bytes = s.as_bytes();
  let mut i = 0;
  if matches!(bytes.first(), Some(b'+' | b'-')) {
    i += 1;
  }
  if s[i..].starts_with("Infinity") {
    return if s.starts_with('-') {
      f64::NEG_INFINITY
    } else {
      f64::INFINITY
    };
  }
  let digits_start = i;
  while i < bytes.len() && bytes[i].is_ascii_digit() {
    i += 1;
  }
  if i < bytes.len() && bytes[i] == b'.' {
    i += 1;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
      i += 1;
    }
  }
  if i == digits_start || &s[digits_start..i] == "." {
    return f64::NAN;
  }
  if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
    let mut j = i + 1;
    if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
      j += 1;
    }
    let exp_digits = j;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
      j += 1;
    }
    if j > exp_digits {
      i = j;
    }
  }
  s[..i].parse::<f64>().unwrap_or(f64::NAN)
}

pub fn to_int32(x: f64) -> i32 {
  to_uint32(x) as i32
}

pub fn to_uint32(x: f64) -> u32 {
  if !x.is_finite() {
    return 0;
  }
  let int = x.trunc();
  let modulo = int.rem_euclid(4294967296.0);
  modulo as u32
}

pub fn is_ecma_whitespace(c: char) -> bool {
  matches!(
    c,
    '\u{0009}'
      | '\u{000A}'
      | '\u{000B}'
      | '\u{000C}'
      | '\u{000D}'
      | '\u{0020}'
      | '\u{00A0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200A}'
      | '\u{2028}'
      | '\u{2029}'
      | '\u{202F}'
      | '\u{205F}'
      | '\u{3000}'
      | '\u{FEFF}'
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn formats_like_js() {
    assert_eq!(number_to_string(1.0), "1");
    assert_eq!(number_to_string(-0.0), "0");
    assert_eq!(number_to_string(1.5), "1.5");
    assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(number_to_string(123456789.0), "123456789");
    assert_eq!(number_to_string(1e21), "1e+21");
    assert_eq!(number_to_string(1.5e300), "1.5e+300");
    assert_eq!(number_to_string(0.000001), "0.000001");
    assert_eq!(number_to_string(1e-7), "1e-7");
    assert_eq!(number_to_string(-2.5e-8), "-2.5e-8");
    assert_eq!(number_to_string(f64::NAN), "NaN");
    assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
  }

  #[test]
  fn radix_strings() {
    assert_eq!(number_to_radix_string(255.0, 16), "ff");
    assert_eq!(number_to_radix_string(-5.0, 2), "-101");
    assert_eq!(number_to_radix_string(0.5, 2), "0.1");
  }

  #[test]
  fn parses_like_js() {
    assert_eq!(string_to_number("  42 "), 42.0);
    assert_eq!(string_to_number(""), 0.0);
    assert_eq!(string_to_number("0x1F"), 31.0);
    assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
    assert!(string_to_number("inf").is_nan());
    assert!(string_to_number("12px").is_nan());
    assert_eq!(parse_int("12px", None), 12.0);
    assert_eq!(parse_int("-0x1A", None), -26.0);
    assert_eq!(parse_int("101", Some(2)), 5.0);
    assert!(parse_int("px", None).is_nan());
    assert_eq!(parse_float("3.25em"), 3.25);
    assert_eq!(parse_float("1e3x"), 1000.0);
    assert_eq!(parse_float("2e"), 2.0);
    assert!(parse_float(".").is_nan());
  }

  #[test]
  fn int32_wraps() {
    assert_eq!(to_int32(4294967295.0), -1);
    assert_eq!(to_int32(-7.8), -7);
    assert_eq!(to_uint32(-1.0), 4294967295);
    assert_eq!(to_int32(f64::NAN), 0);
  }

  proptest! {
    #[test]
    fn formatted_numbers_round_trip(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
      let s = number_to_string(x);
      let back = string_to_number(&s);
      prop_assert!(back == x || (x == 0.0 && back == 0.0), "{} -> {} -> {}", x, s, back);
    }

    #[test]
    fn integers_format_without_fraction(x in -1_000_000_000i64..1_000_000_000i64) {
      prop_assert_eq!(number_to_string(x as f64), x.to_string());
    }
  }
}
