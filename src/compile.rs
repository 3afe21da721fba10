// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::{Document, Value};
use crate::error::SigilError;
use crate::resolve::{imports, inherit, merge, platform, vars};
use crate::text;

/// Platform tag used to select `key<tag>` annotations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlatformTag {
    /// Resolve from the host OS when the compilation runs.
    #[default]
    Host,
    /// A fixed tag, typically from a command line flag.
    Named(String),
}

impl PlatformTag {
    fn resolve(&self) -> String {
        match self {
            PlatformTag::Host => platform::host_platform(),
            PlatformTag::Named(tag) => tag.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Directories searched for import targets, in order. The directory of
    /// the file being compiled is always tried first.
    pub import_dirs: Vec<PathBuf>,
    pub platform: PlatformTag,
}

/// One compilation configuration, reusable across files.
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Compiler { options }
    }

    /// Compile a source string. Relative imports resolve against the
    /// configured import directories only.
    pub fn compile_str(&self, src: &str) -> Result<Document, SigilError> {
        let dirs = self.search_dirs(None);
        self.compile_tree(src, &dirs)
    }

    /// Compile a file on disk. Its parent directory heads the import search
    /// path for this compilation.
    pub fn compile_file(&self, path: &Path) -> Result<Document, SigilError> {
        tracing::debug!(path = %path.display(), "compiling");
        let src = read_source(path)?;
        let dirs = self.search_dirs(path.parent());
        self.compile_tree(&src, &dirs)
    }

    fn search_dirs(&self, parent: Option<&Path>) -> Vec<PathBuf> {
        let mut dirs = Vec::with_capacity(self.options.import_dirs.len() + 1);
        if let Some(parent) = parent {
            dirs.push(parent.to_path_buf());
        }
        dirs.extend(self.options.import_dirs.iter().cloned());
        dirs
    }

    fn compile_tree(&self, src: &str, dirs: &[PathBuf]) -> Result<Document, SigilError> {
        let mut doc = self.import_tree(src, dirs)?;
        inherit::resolve_inheritance(&mut doc);
        platform::resolve_platform(&mut doc, &self.options.platform.resolve());
        vars::resolve_vars(&mut doc)?;
        Ok(doc)
    }

    /// Parse a source buffer and fill in its imports, depth first. Imported
    /// trees are merged unresolved; the semantic passes then run once over
    /// the whole merged document. An import that cannot be located is logged
    /// and skipped; one that exists but cannot be read is fatal.
    fn import_tree(&self, src: &str, dirs: &[PathBuf]) -> Result<Document, SigilError> {
        let stripped = text::comments::strip_comments(src);
        let (targets, body) = imports::split_imports(&stripped);
        let mut doc = parse_canonical(&text::canonicalize(&body))?;
        if targets.is_empty() {
            return Ok(doc);
        }
        let search: Vec<PathBuf> = if dirs.is_empty() {
            tracing::warn!("no import search directories, resolving against the current directory");
            vec![PathBuf::from(".")]
        } else {
            dirs.to_vec()
        };
        for target in targets {
            let path = match imports::locate(&target, &search) {
                Some(path) => path,
                None => {
                    tracing::warn!(import = %target, "import target not found, skipping");
                    continue;
                }
            };
            let imported_src = read_source(&path)?;
            let mut child_dirs = search.clone();
            if let Some(parent) = path.parent() {
                child_dirs.insert(0, parent.to_path_buf());
            }
            let imported = self.import_tree(&imported_src, &child_dirs)?;
            merge::fill_missing(&mut doc, &imported);
        }
        Ok(doc)
    }
}

fn read_source(path: &Path) -> Result<String, SigilError> {
    fs::read_to_string(path).map_err(|err| SigilError::FileError {
        message: err.to_string(),
        path: path.display().to_string(),
        hint: None,
        code: None,
    })
}

/// Strict-parse boundary between the text pipeline and the tree passes. A
/// failure dumps the canonical text with line numbers, which is where the
/// parser's positions point.
fn parse_canonical(canon: &str) -> Result<Document, SigilError> {
    let json: serde_json::Value =
        serde_json::from_str(canon).map_err(|err| SigilError::Parse {
            message: err.to_string(),
            dump: numbered(canon),
            hint: Some("check for unbalanced brackets or stray punctuation".into()),
            code: None,
        })?;
    match Value::from_json(json) {
        Value::Object(doc) => Ok(doc),
        _ => Err(SigilError::Parse {
            message: "document root must be an object".into(),
            dump: numbered(canon),
            hint: None,
            code: None,
        }),
    }
}

fn numbered(text: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| format!("{:>4} {}", i + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::to_json_pretty;
    use std::io::Write;

    fn compiler() -> Compiler {
        Compiler::new(CompileOptions {
            import_dirs: Vec::new(),
            platform: PlatformTag::Named("linux".into()),
        })
    }

    #[test]
    fn test_compile_str_full_pipeline() {
        let src = r#"
// demo config
{
    base: {
        opt: 0
        flags: 1<<2
    }
    release(base): {
        opt: 3
    }
    path: none
    "path<linux>": elf
    sigil_vars: {
        out: build
    }
    dir: "${out}/bin"
}
"#;
        let doc = compiler().compile_str(src).unwrap();
        let release = doc.get("release").and_then(Value::as_object).unwrap();
        assert_eq!(release.get("opt"), Some(&Value::Integer(3)));
        assert_eq!(release.get("flags"), Some(&Value::Integer(4)));
        assert_eq!(doc.get("path"), Some(&Value::String("elf".into())));
        assert_eq!(doc.get("dir"), Some(&Value::String("build/bin".into())));
        assert!(doc.get("sigil_vars").is_none());
    }

    #[test]
    fn test_compile_str_reports_undefined_variable() {
        let err = compiler().compile_str("{key: \"${ghost}\"}").unwrap_err();
        match err {
            SigilError::UndefinedVariable { name, .. } => assert_eq!(name, "ghost"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_failure_dumps_numbered_text() {
        let err = compiler().compile_str("{a: 1").unwrap_err();
        match err {
            SigilError::Parse { dump, .. } => assert!(dump.starts_with("   1 ")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_compile_file_merges_imports() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.sigil");
        let mut f = std::fs::File::create(&base).unwrap();
        writeln!(f, "{{\n    a: 1\n    shared: imported\n}}").unwrap();
        let main = dir.path().join("main.sigil");
        let mut f = std::fs::File::create(&main).unwrap();
        writeln!(f, "import base.sigil\n{{\n    a: 2\n    b: 3\n}}").unwrap();

        let doc = compiler().compile_file(&main).unwrap();
        assert_eq!(doc.get("a"), Some(&Value::Integer(2)));
        assert_eq!(doc.get("b"), Some(&Value::Integer(3)));
        assert_eq!(doc.get("shared"), Some(&Value::String("imported".into())));
    }

    #[test]
    fn test_missing_import_is_skipped() {
        let doc = compiler().compile_str("import ghost.sigil\n{a: 1}").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_unreadable_input_is_a_file_error() {
        let err = compiler()
            .compile_file(Path::new("/nonexistent/x.sigil"))
            .unwrap_err();
        match err {
            SigilError::FileError { path, .. } => assert!(path.ends_with("x.sigil")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_pretty_output_is_indented_json() {
        let doc = compiler().compile_str("{a: {b: 1}}").unwrap();
        let text = to_json_pretty(&doc);
        assert!(text.contains("    \"b\": 1"));
    }
}
