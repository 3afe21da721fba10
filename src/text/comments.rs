use super::scan::{find_strings, StringSpan};

/// Find `marker` in `line` at or after `from`, skipping occurrences that sit
/// inside a quoted literal.
fn find_marker(line: &str, spans: &[StringSpan], marker: &str, from: usize) -> Option<usize> {
    let mut at = from;
    while let Some(off) = line.get(at..).and_then(|rest| rest.find(marker)) {
        let pos = at + off;
        match spans.iter().find(|s| s.interior(pos)) {
            Some(span) => at = span.end,
            None => return Some(pos),
        }
    }
    None
}

/// Remove `//` line comments and `/* */` block comments. Markers inside
/// quoted literals are text, not comments. Line structure is preserved so
/// later passes see the original line boundaries.
pub fn strip_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut in_block = false;
    for line in src.split('\n') {
        let spans = find_strings(line);
        let mut pos = 0;
        loop {
            if in_block {
                match line.get(pos..).and_then(|rest| rest.find("*/")) {
                    Some(off) => {
                        pos = pos + off + 2;
                        in_block = false;
                    }
                    None => break,
                }
            }
            let line_at = find_marker(line, &spans, "//", pos);
            let block_at = find_marker(line, &spans, "/*", pos);
            match (line_at, block_at) {
                (Some(l), b) if b.map_or(true, |b| l < b) => {
                    out.push_str(&line[pos..l]);
                    break;
                }
                (_, Some(b)) => {
                    out.push_str(&line[pos..b]);
                    pos = b + 2;
                    in_block = true;
                }
                _ => {
                    out.push_str(&line[pos..]);
                    break;
                }
            }
        }
        out.push('\n');
    }
    out
}
