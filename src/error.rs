//! Error types for reader and evaluator failures.

use thiserror::Error;

/// The closed error taxonomy. Every failure the interpreter can produce
/// falls into exactly one of these four buckets; there is no open-ended
/// "other" variant, so a REPL can always map an error to one of the
/// four labels below.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LispError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Symbol not bound: {0}")]
    Unbound(String),

    #[error("Wrong number of arguments: {0}")]
    Args(String),

    #[error("Wrong type: {0}")]
    Type(String),
}

impl LispError {
    pub fn syntax(message: impl Into<String>) -> Self {
        LispError::Syntax(message.into())
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        LispError::Unbound(name.into())
    }

    pub fn args(message: impl Into<String>) -> Self {
        LispError::Args(message.into())
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        LispError::Type(message.into())
    }

    /// The short label the REPL prints ahead of the message, per the
    /// exact wording contracts: "Syntax error", "Symbol not bound",
    /// "Wrong number of arguments", "Wrong type".
    pub fn label(&self) -> &'static str {
        match self {
            LispError::Syntax(_) => "Syntax error",
            LispError::Unbound(_) => "Symbol not bound",
            LispError::Args(_) => "Wrong number of arguments",
            LispError::Type(_) => "Wrong type",
        }
    }
}

pub type LispResult<T> = Result<T, LispError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_matches_variant() {
        assert_eq!(LispError::syntax("x").label(), "Syntax error");
        assert_eq!(LispError::unbound("X").label(), "Symbol not bound");
        assert_eq!(LispError::args("CAR").label(), "Wrong number of arguments");
        assert_eq!(LispError::type_error("CAR").label(), "Wrong type");
    }

    #[test]
    fn display_includes_label_and_message() {
        let e = LispError::unbound("FOO");
        assert_eq!(e.to_string(), "Symbol not bound: FOO");
    }
}
