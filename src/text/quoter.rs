use super::literal;
use super::scan::{find_strings, inside_quotes, StringSpan};
use crate::ast::INHERIT_KEY;

/// Find `needle` at or after `from`, ignoring occurrences inside quoted
/// literals.
fn find_outside(src: &str, spans: &[StringSpan], needle: char, from: usize) -> Option<usize> {
    let mut at = from;
    while let Some(off) = src.get(at..).and_then(|rest| rest.find(needle)) {
        let pos = at + off;
        match inside_quotes(spans, pos) {
            Some(end) => at = end,
            None => return Some(pos),
        }
    }
    None
}

/// First of `stops` at or after `from`, quoted literals ignored. Falls back
/// to the end of the buffer when none remains.
fn find_first(src: &str, spans: &[StringSpan], stops: &[char], from: usize) -> usize {
    let mut at = from;
    loop {
        match src.get(at..).and_then(|rest| rest.find(stops)) {
            Some(off) => {
                let pos = at + off;
                match inside_quotes(spans, pos) {
                    Some(end) => at = end,
                    None => return pos,
                }
            }
            None => return src.len(),
        }
    }
}

fn rfind_outside(src: &str, spans: &[StringSpan], needle: char, before: usize) -> Option<usize> {
    src[..before]
        .char_indices()
        .rev()
        .find(|&(i, c)| c == needle && inside_quotes(spans, i).is_none())
        .map(|(i, _)| i)
}

/// Index one past the bracket matching the opener at `pos`. Unbalanced input
/// runs to the end of the buffer.
fn enclose(src: &str, spans: &[StringSpan], open: char, close: char, pos: usize) -> usize {
    let mut depth = 0usize;
    for (i, c) in src[pos..].char_indices() {
        let abs = pos + i;
        if inside_quotes(spans, abs).is_some() {
            continue;
        }
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return abs + 1;
            }
        }
    }
    src.len()
}

/// Split `name(parent, other)` into the bare key and its parent list. Keys
/// without an annotation, and keys already quoted, come back unchanged.
fn split_inherits(key: &str) -> (String, Vec<String>) {
    if key.starts_with('"') {
        return (key.to_string(), Vec::new());
    }
    let (bp, ep) = match (key.find('('), key.rfind(')')) {
        (Some(b), Some(e)) if b < e => (b, e),
        _ => return (key.to_string(), Vec::new()),
    };
    let parents = key[bp + 1..ep]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    (key[..bp].to_string(), parents)
}

/// Quote every bare key and scalar in a dense buffer, producing strict JSON
/// structure. An inheritance annotation on a key is rewritten into a reserved
/// first member of the child object for the merger to consume.
pub fn quote_object(src: &str) -> String {
    let spans = find_strings(src);
    let mut out = String::with_capacity(src.len() + src.len() / 2);
    let mut cur = 0;
    let mut pos = 0;
    while let Some(colon) = find_outside(src, &spans, ':', pos) {
        let mut delim = 0;
        for d in [',', '{'] {
            if let Some(at) = rfind_outside(src, &spans, d, colon) {
                delim = delim.max(at);
            }
        }
        // a comma inside a `key(parent, other)` annotation is not the key
        // delimiter; back up past the opening parenthesis when one encloses it
        if let (Some(bp), Some(ep)) = (
            rfind_outside(src, &spans, '(', colon),
            find_outside(src, &spans, ')', delim),
        ) {
            if bp < delim && delim < ep && ep < colon {
                delim = 0;
                for d in [',', '{'] {
                    if let Some(at) = rfind_outside(src, &spans, d, bp) {
                        delim = delim.max(at);
                    }
                }
            }
        }
        if delim + 1 > cur {
            out.push_str(&src[cur..delim + 1]);
        }
        let key = &src[delim + 1..colon];
        let (name, parents) = split_inherits(key);
        out.push_str(&literal::in_quotes(&name));
        out.push(':');
        let value_at = colon + 1;
        match src.as_bytes().get(value_at) {
            Some(b'{') => {
                out.push('{');
                if !parents.is_empty() {
                    let list = parents
                        .iter()
                        .map(|p| format!("\"{}\"", p))
                        .collect::<Vec<_>>()
                        .join(",");
                    out.push_str(&format!("\"{}\":[{}],", INHERIT_KEY, list));
                }
                pos = value_at + 1;
            }
            Some(b'[') => {
                let end = enclose(src, &spans, '[', ']', value_at);
                let body = src.get(value_at + 1..end.saturating_sub(1)).unwrap_or("");
                out.push('[');
                out.push_str(&quote_array(body));
                out.push(']');
                pos = end;
            }
            _ => {
                let next = find_first(src, &spans, &[',', ']', '}'], value_at);
                out.push_str(&literal::normalize(&src[value_at..next]));
                pos = next;
            }
        }
        cur = pos;
    }
    out.push_str(&src[cur..]);
    out
}

/// Rewrite the comma-separated elements of an array body. Nested arrays and
/// objects recurse; scalars are normalized in place.
pub fn quote_array(body: &str) -> String {
    let spans = find_strings(body);
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        if inside_quotes(&spans, i).is_some() {
            continue;
        }
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    let mut quoted = Vec::with_capacity(parts.len());
    for part in parts {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if part.starts_with('{') {
            quoted.push(quote_object(part));
        } else if part.starts_with('[') {
            let inner = part.get(1..part.len() - 1).unwrap_or("");
            quoted.push(format!("[{}]", quote_array(inner)));
        } else {
            quoted.push(literal::normalize(part));
        }
    }
    quoted.join(",")
}
