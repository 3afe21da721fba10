use std::fmt;

/// The main error type for sigil compilation.
#[derive(Debug, Clone, PartialEq)]
pub enum SigilError {
    /// Raised when the canonicalized text fails strict JSON parsing.
    /// `dump` carries the canonical text with 1-based line numbers.
    Parse {
        message: String,
        dump: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a `${name}` reference has no binding in scope.
    UndefinedVariable {
        name: String,
        value: String,
        bindings: String,
        code: Option<u32>,
    },
}

impl fmt::Display for SigilError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigilError::Parse { message, dump, hint, code } => write!(
                f,
                "[SIGIL] Parse Error: {}{}{}\n{}",
                message,
                hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                code.map_or(String::new(), |c| format!(" Code: {}", c)),
                dump,
            ),
            SigilError::FileError { message, path, hint, code } => write!(
                f,
                "[SIGIL] File Error '{}': {}{}{}",
                path,
                message,
                hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                code.map_or(String::new(), |c| format!(" Code: {}", c)),
            ),
            SigilError::UndefinedVariable { name, value, bindings, code } => write!(
                f,
                "[SIGIL] Undefined variable '{}' in value {:?}{}\nbindings in scope:\n{}",
                name,
                value,
                code.map_or(String::new(), |c| format!(" Code: {}", c)),
                bindings,
            ),
        }
    }
}

impl std::error::Error for SigilError {}
