use super::arg;
use super::method;
use crate::map::PropertyMap;
use crate::ops;
use crate::value::Value;
use ahash::RandomState;
use std::cell::Cell;

thread_local! {
  static RANDOM: (RandomState, Cell<u64>) = (RandomState::new(), Cell::new(0));
}

/// A value in `[0, 1)`. `RandomState` is seeded per thread, so hashing a counter gives a cheap
/// non-cryptographic stream.
fn random() -> f64 {
  RANDOM.with(|(state, counter)| {
    let n = counter.get();
    counter.set(n.wrapping_add(1));
    let bits = state.hash_one(n) >> 11;
    bits as f64 / (1u64 << 53) as f64
  })
}

fn unary(m: &mut PropertyMap<Value>, name: &str, f: fn(f64) -> f64) {
  method(m, name, move |_, _, args| {
    Ok(Value::Number(f(ops::to_number(&arg(&args, 0)))))
  });
}

/// `Math.round`: halves round towards positive infinity.
fn round(x: f64) -> f64 {
  if !x.is_finite() || x.fract() == 0.0 {
    return x;
  }
  let r = (x + 0.5).floor();
  // Keep the sign of values in (-0.5, 0).
  if r == 0.0 && x < 0.0 {
    -0.0
  } else {
    r
  }
}

fn sign(x: f64) -> f64 {
  if x.is_nan() || x == 0.0 {
    x
  } else {
    x.signum()
  }
}

fn extremum(args: &[Value], start: f64, pick: fn(f64, f64) -> f64) -> f64 {
  let mut acc = start;
  for v in args.iter() {
    let n = ops::to_number(v);
    if n.is_nan() {
      return f64::NAN;
    }
    acc = pick(acc, n);
  }
  acc
}

pub(super) fn members() -> PropertyMap<Value> {
  let mut m = PropertyMap::new();
  unary(&mut m, "abs", f64::abs);
  unary(&mut m, "floor", f64::floor);
  unary(&mut m, "ceil", f64::ceil);
  unary(&mut m, "round", round);
  unary(&mut m, "trunc", f64::trunc);
  unary(&mut m, "sign", sign);
  unary(&mut m, "sqrt", f64::sqrt);
  unary(&mut m, "cbrt", f64::cbrt);
  unary(&mut m, "exp", f64::exp);
  unary(&mut m, "log", f64::ln);
  unary(&mut m, "log2", f64::log2);
  unary(&mut m, "log10", f64::log10);
  unary(&mut m, "sin", f64::sin);
  unary(&mut m, "cos", f64::cos);
  unary(&mut m, "tan", f64::tan);
  unary(&mut m, "asin", f64::asin);
  unary(&mut m, "acos", f64::acos);
  unary(&mut m, "atan", f64::atan);
  method(&mut m, "atan2", |_, _, args| {
    let y = ops::to_number(&arg(&args, 0));
    let x = ops::to_number(&arg(&args, 1));
    Ok(Value::Number(y.atan2(x)))
  });
  method(&mut m, "pow", |_, _, args| {
    let base = ops::to_number(&arg(&args, 0));
    let exp = ops::to_number(&arg(&args, 1));
    Ok(Value::Number(if exp.is_nan() { f64::NAN } else { base.powf(exp) }))
  });
  method(&mut m, "hypot", |_, _, args| {
    let sum: f64 = args.iter().map(|v| ops::to_number(v).powi(2)).sum();
    Ok(Value::Number(sum.sqrt()))
  });
  method(&mut m, "max", |_, _, args| {
    Ok(Value::Number(extremum(&args, f64::NEG_INFINITY, f64::max)))
  });
  method(&mut m, "min", |_, _, args| {
    Ok(Value::Number(extremum(&args, f64::INFINITY, f64::min)))
  });
  method(&mut m, "random", |_, _, _| Ok(Value::Number(random())));
  m.insert("PI", Value::Number(std::f64::consts::PI));
  m.insert("E", Value::Number(std::f64::consts::E));
  m.insert("LN2", Value::Number(std::f64::consts::LN_2));
  m.insert("LN10", Value::Number(std::f64::consts::LN_10));
  m.insert("LOG2E", Value::Number(std::f64::consts::LOG2_E));
  m.insert("LOG10E", Value::Number(std::f64::consts::LOG10_E));
  m.insert("SQRT2", Value::Number(std::f64::consts::SQRT_2));
  m.insert("SQRT1_2", Value::Number(std::f64::consts::FRAC_1_SQRT_2));
  m
}

#[cfg(test)]
mod tests {
  use super::random;
  use super::round;

  #[test]
  fn rounds_halves_up() {
    assert_eq!(round(2.5), 3.0);
    assert_eq!(round(-2.5), -2.0);
    assert_eq!(round(-0.2).to_bits(), (-0.0f64).to_bits());
  }

  #[test]
  fn random_stays_in_unit_interval() {
    for _ in 0..1000 {
      let r = random();
      assert!((0.0..1.0).contains(&r));
    }
  }
}
