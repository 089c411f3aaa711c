//! Error and diagnostic types for the rbcst engine.
//!
//! Two channels exist and they must not be confused:
//!
//! - [`ParseDiagnostic`] is a recoverable `(line, message)` record raised by the
//!   upstream parser (`alias_error`, `assign_error`, `class_name_error`,
//!   `param_error`, `parse_error`). The normalizer records it, substitutes the
//!   best-effort node and keeps going. Diagnostics never change the exit status.
//! - [`CstError`] is fatal. It covers unreadable input, a malformed event
//!   stream, and events whose arguments have a shape no handler can classify.
//!   A run that hits one produces no tree.
//!
//! Use the `err_msg!` macro for message-only variants:
//!
//! ```rust
//! use rbcst::err_msg;
//! let err = err_msg!(Shape, "expected a node for `{}`", "receiver");
//! assert!(err.to_string().contains("receiver"));
//! ```

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// RECOVERABLE DIAGNOSTICS
// ============================================================================

/// A recoverable diagnostic reported by the upstream parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub line: usize,
    pub message: String,
}

impl ParseDiagnostic {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.message)
    }
}

// ============================================================================
// FATAL ERRORS
// ============================================================================

/// Unified fatal error type for every stage of a normalization run.
#[derive(Debug, Error, Diagnostic)]
pub enum CstError {
    #[error("failed to read `{path}`")]
    #[diagnostic(code(rbcst::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed event stream: {message}")]
    #[diagnostic(
        code(rbcst::stream),
        help("each event is {{\"event\": name, \"args\": [...], \"line\": n, \"column\": n}}; arguments are null, booleans, strings, {{\"sym\": s}}, {{\"ref\": n}} or arrays")
    )]
    Stream { message: String },

    #[error("unexpected argument shape: {message}")]
    #[diagnostic(code(rbcst::shape))]
    Shape { message: String },

    #[error("event #{index} `{event}` at {line}:{column} could not be normalized")]
    #[diagnostic(
        code(rbcst::event),
        help("the event producer and the normalizer disagree about this production's arguments")
    )]
    Event {
        index: usize,
        event: String,
        line: usize,
        column: usize,
        #[source]
        source: Box<CstError>,
    },

    #[error("suite error: {message}")]
    #[diagnostic(code(rbcst::harness))]
    Harness { message: String },
}

impl CstError {
    /// Attaches the failing event's identity to an error raised by a handler.
    pub fn in_event(self, index: usize, event: &str, line: usize, column: usize) -> Self {
        CstError::Event {
            index,
            event: event.to_string(),
            line,
            column,
            source: Box::new(self),
        }
    }

    /// Returns the stable diagnostic code of this error.
    pub fn code_str(&self) -> &'static str {
        match self {
            CstError::Io { .. } => "rbcst::io",
            CstError::Stream { .. } => "rbcst::stream",
            CstError::Shape { .. } => "rbcst::shape",
            CstError::Event { .. } => "rbcst::event",
            CstError::Harness { .. } => "rbcst::harness",
        }
    }
}

/// Constructs a message-only [`CstError`] variant with a formatted message.
///
/// Works for the `Stream`, `Shape` and `Harness` variants.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $msg:expr) => {
        $crate::CstError::$variant {
            message: format!("{}", $msg),
        }
    };
    ($variant:ident, $fmt:expr, $($arg:expr),+ $(,)?) => {
        $crate::CstError::$variant {
            message: format!($fmt, $($arg),+),
        }
    };
}

#[cfg(test)]
mod tests {
    use miette::Report;

    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = ParseDiagnostic::new(3, "can't make alias for the number variables");
        assert_eq!(
            diagnostic.to_string(),
            "3: can't make alias for the number variables"
        );
    }

    #[test]
    fn test_err_msg_formats() {
        let err = err_msg!(Shape, "expected {} arguments, found {}", 2, 3);
        assert_eq!(
            err.to_string(),
            "unexpected argument shape: expected 2 arguments, found 3"
        );
        assert_eq!(err.code_str(), "rbcst::shape");
    }

    #[test]
    fn test_event_context_chains_source() {
        let err =
            err_msg!(Shape, "symbol_literal needs a node").in_event(7, "symbol_literal", 2, 4);
        assert_eq!(err.code_str(), "rbcst::event");
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("symbol_literal"));
        assert!(output.contains("needs a node"));
    }
}
