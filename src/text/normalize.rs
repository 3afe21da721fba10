use super::scan::{find_strings, inside_quotes};

/// Rewrite single-quoted literals as double-quoted. Double quotes appearing
/// inside a single-quoted literal are escaped so the result stays parseable.
pub fn normalize_quotes(src: &str) -> String {
    let spans = find_strings(src);
    let mut out = String::with_capacity(src.len());
    let mut prev = '\0';
    for (i, c) in src.char_indices() {
        let interior = spans.iter().any(|s| s.interior(i));
        match c {
            '\'' if !interior => out.push('"'),
            '"' if interior && prev != '\\' => out.push_str("\\\""),
            _ => out.push(c),
        }
        prev = c;
    }
    out
}

/// Trim surrounding whitespace from each line, keeping line boundaries.
pub fn trim_lines(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for line in src.split('\n') {
        out.push_str(line.trim());
        out.push('\n');
    }
    out
}

/// Insert a comma before each line break where the preceding significant
/// character does not already continue the structure.
pub fn insert_line_commas(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut prev = '\0';
    for c in src.chars() {
        if c == '\n' && !matches!(prev, ',' | ':' | '{' | '\n' | '\\' | '[' | '\0') {
            out.push(',');
        }
        out.push(c);
        if !c.is_whitespace() || c == '\n' {
            prev = c;
        }
    }
    out
}

/// Join lines ended with a backslash continuation. Backslashes inside quoted
/// literals are untouched.
pub fn collapse_continuations(src: &str) -> String {
    let spans = find_strings(src);
    let mut out = String::with_capacity(src.len());
    let mut skip_newline = false;
    for (pos, c) in src.char_indices() {
        if skip_newline {
            skip_newline = false;
            if c == '\n' {
                continue;
            }
        }
        if c == '\\'
            && !spans.iter().any(|s| s.interior(pos))
            && src[pos + 1..].starts_with('\n')
        {
            skip_newline = true;
            continue;
        }
        out.push(c);
    }
    out
}

/// Delete every whitespace character outside quoted literals, newlines
/// included. After this pass the buffer is a single dense line.
pub fn strip_unquoted_whitespace(src: &str) -> String {
    let spans = find_strings(src);
    let mut out = String::with_capacity(src.len());
    for (pos, c) in src.char_indices() {
        if c.is_whitespace() && inside_quotes(&spans, pos).is_none() {
            continue;
        }
        out.push(c);
    }
    out
}
