use std::path::PathBuf;

/// Split off the `import <target>` directive lines preceding the root `{`.
/// Returns the targets in declaration order and the remaining source.
pub fn split_imports(src: &str) -> (Vec<String>, String) {
    let mut targets = Vec::new();
    let mut body = Vec::new();
    let mut head = true;
    for line in src.lines() {
        if head {
            let t = line.trim();
            if t.is_empty() {
                continue;
            }
            if let Some(rest) = t.strip_prefix("import") {
                if rest.starts_with(char::is_whitespace) {
                    let target = rest.trim().trim_matches(['"', '\'']);
                    if !target.is_empty() {
                        targets.push(target.to_string());
                    }
                    continue;
                }
            }
            head = false;
        }
        body.push(line);
    }
    (targets, body.join("\n"))
}

/// Expand a leading `~/` against the caller's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Locate an import target. An absolute target stands on its own; a relative
/// one is tried against each search directory in order, first hit wins.
pub fn locate(target: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let expanded = expand_home(target);
    if expanded.is_absolute() {
        return expanded.is_file().then_some(expanded);
    }
    for dir in search_dirs {
        let candidate = dir.join(&expanded);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "resolved import");
            return Some(candidate);
        }
    }
    None
}
