/// Shape of a scalar as written in source text, decided before any quoting
/// or rewriting happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Object,
    Array,
    Bool,
    Float,
    Hex,
    Binary,
    Shift,
    Int,
}

/// Classify a raw scalar. The order of checks matters: `0x`/`0b` prefixes
/// win over the digit test, a shift expression wins over plain digits, and
/// anything unrecognized falls back to `String`.
pub fn classify(value: &str) -> LiteralKind {
    let v = value.trim();
    if v.starts_with('"') {
        return LiteralKind::String;
    }
    if v.starts_with('{') {
        return LiteralKind::Object;
    }
    if v.starts_with('[') {
        return LiteralKind::Array;
    }
    if v == "true" || v == "false" {
        return LiteralKind::Bool;
    }
    if v.starts_with("0x") {
        return LiteralKind::Hex;
    }
    if v.starts_with("0b") {
        return LiteralKind::Binary;
    }
    if v.contains("<<") || v.contains(">>") {
        return LiteralKind::Shift;
    }
    let unsigned = v.strip_prefix(['-', '+']).unwrap_or(v);
    if !unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        if unsigned.contains('.') {
            return LiteralKind::Float;
        }
        return LiteralKind::Int;
    }
    LiteralKind::String
}

pub(crate) fn in_quotes(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') {
        value.to_string()
    } else {
        format!("\"{}\"", value)
    }
}

fn radix_text(value: &str, radix: u32) -> String {
    match value.get(2..).and_then(|d| i64::from_str_radix(d, radix).ok()) {
        Some(n) => n.to_string(),
        None => in_quotes(value),
    }
}

/// Fold a `a<<b` / `a>>b` expression, with `|` combining several terms.
/// Anything that fails to evaluate is kept as a quoted string.
fn shift_text(value: &str) -> String {
    let mut acc: i64 = 0;
    for term in value.split('|') {
        let term = term.trim();
        let folded = if let Some((lhs, rhs)) = term.split_once("<<") {
            eval_shift(lhs, rhs, false)
        } else if let Some((lhs, rhs)) = term.split_once(">>") {
            eval_shift(lhs, rhs, true)
        } else {
            term.parse::<i64>().ok()
        };
        match folded {
            Some(n) => acc |= n,
            None => return in_quotes(value),
        }
    }
    acc.to_string()
}

fn eval_shift(lhs: &str, rhs: &str, right: bool) -> Option<i64> {
    let base = lhs.trim().parse::<i64>().ok()?;
    let amount = u32::try_from(rhs.trim().parse::<i64>().ok()?).ok()?;
    if right {
        base.checked_shr(amount)
    } else {
        base.checked_shl(amount)
    }
}

fn float_text(value: &str) -> String {
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    if digits.starts_with('.') {
        return format!("{}0{}", sign, digits);
    }
    if digits.ends_with('.') {
        return format!("{}{}0", sign, digits);
    }
    value.to_string()
}

/// Rewrite a raw scalar into its strict JSON form.
pub fn normalize(value: &str) -> String {
    let v = value.trim();
    match classify(v) {
        LiteralKind::Bool => v.to_string(),
        LiteralKind::Hex => radix_text(v, 16),
        LiteralKind::Binary => radix_text(v, 2),
        LiteralKind::Shift => shift_text(v),
        LiteralKind::Float => float_text(v.strip_prefix('+').unwrap_or(v)),
        LiteralKind::Int => v.strip_prefix('+').unwrap_or(v).to_string(),
        LiteralKind::String => in_quotes(v),
        LiteralKind::Object | LiteralKind::Array => v.to_string(),
    }
}
