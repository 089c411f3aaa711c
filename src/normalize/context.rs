//! Cross-event state of one normalization run.
//!
//! The upstream parser delivers events strictly bottom-up and left-to-right.
//! A few decisions depend on tokens seen earlier in that order (which string
//! opener is active, whether the last operator was `**`, where the last `)`
//! closed). That state lives here and is threaded through every handler by
//! reference. A fresh context is created per run.

use crate::cst::Kind;
use crate::diagnostics::ParseDiagnostic;
use crate::{err_msg, CstError};

/// A lexer position, 1-based lines and 0-based columns as Ripper reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The position one column to the left, if any.
    pub fn previous_column(self) -> Option<Position> {
        self.column
            .checked_sub(1)
            .map(|column| Position::new(self.line, column))
    }
}

/// The most recently scanned `)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedParen {
    pub at: Position,
    /// Set once a `not`/`defined?` operand claimed this parenthesis.
    pub used: bool,
}

#[derive(Debug)]
pub struct Context {
    position: Position,
    token: Option<String>,
    delimiters: Vec<String>,
    kwrest: bool,
    oneline_pattern: Kind,
    lambda_body: (Kind, Kind),
    last_rparen: Option<ClosedParen>,
    last_semicolon: Option<Position>,
    has_end: bool,
    diagnostics: Vec<ParseDiagnostic>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            token: None,
            delimiters: Vec::new(),
            kwrest: false,
            oneline_pattern: Kind::TestPattern,
            lambda_body: (Kind::Block, Kind::BlockBody),
            last_rparen: None,
            last_semicolon: None,
            has_end: false,
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Ambient event data
    // =========================================================================

    /// Sets the position and current token of the event about to be handled.
    pub fn enter_event(&mut self, position: Position, token: Option<String>) {
        self.position = position;
        self.token = token;
    }

    pub fn current_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    // =========================================================================
    // Delimiter stack
    // =========================================================================

    pub fn push_delimiter(&mut self, opener: impl Into<String>) {
        self.delimiters.push(opener.into());
    }

    pub fn pop_delimiter(&mut self) -> Result<String, CstError> {
        self.delimiters
            .pop()
            .ok_or_else(|| err_msg!(Shape, "literal closed with no open delimiter"))
    }

    pub fn top_delimiter(&self) -> Option<&str> {
        self.delimiters.last().map(String::as_str)
    }

    pub fn in_heredoc(&self) -> bool {
        self.top_delimiter().is_some_and(|top| top.starts_with('<'))
    }

    /// True when the innermost literal does not interpret escapes:
    /// single-quote-like openers and the `%q`, `%w`, `%i` families.
    pub fn raw_literal(&self) -> bool {
        let Some(top) = self.top_delimiter() else {
            return false;
        };
        if top.starts_with("%r") || top.starts_with("%Q") || top.starts_with("%'") {
            return false;
        }
        top.contains('\'')
            || top.starts_with("%q")
            || top.starts_with("%w")
            || top.starts_with("%i")
    }

    /// True when the innermost literal is a quoted symbol (`:"`, `:'`, `%s`).
    pub fn in_delimited_symbol(&self) -> bool {
        self.top_delimiter()
            .is_some_and(|top| top == ":\"" || top == ":'" || top.starts_with("%s"))
    }

    // =========================================================================
    // Operator and keyword memory
    // =========================================================================

    /// Records an operator token. Remembers whether it was `**` and switches
    /// single-clause patterns to `match_pattern` on `=>`.
    pub fn saw_operator(&mut self, op: &str) {
        self.kwrest = op == "**";
        if op == "=>" {
            self.oneline_pattern = Kind::MatchPattern;
        }
    }

    pub fn saw_keyword(&mut self, keyword: &str) {
        if keyword == "in" {
            self.oneline_pattern = Kind::TestPattern;
        }
    }

    /// Reads and clears the `**` flag.
    pub fn take_kwrest(&mut self) -> bool {
        std::mem::take(&mut self.kwrest)
    }

    pub fn oneline_pattern(&self) -> Kind {
        self.oneline_pattern
    }

    // =========================================================================
    // Lambda body shape
    // =========================================================================

    /// A `bodystmt` completed most recently: lambda bodies are `do ... end`.
    pub fn saw_body_statement(&mut self) {
        self.lambda_body = (Kind::DoBlock, Kind::BodyStatement);
    }

    /// A statement list grew most recently: lambda bodies are braces.
    pub fn saw_statement(&mut self) {
        self.lambda_body = (Kind::Block, Kind::BlockBody);
    }

    pub fn lambda_body(&self) -> (Kind, Kind) {
        self.lambda_body
    }

    // =========================================================================
    // Punctuation memory
    // =========================================================================

    pub fn saw_rparen(&mut self) {
        self.last_rparen = Some(ClosedParen {
            at: self.position,
            used: false,
        });
    }

    /// True when the last `)` closed exactly one column before the current
    /// position.
    pub fn rparen_just_closed(&self) -> bool {
        match (self.last_rparen, self.position.previous_column()) {
            (Some(paren), Some(previous)) => paren.at == previous,
            _ => false,
        }
    }

    /// Marks the last `)` as claimed by a `not`/`defined?` operand.
    pub fn claim_rparen(&mut self) {
        if let Some(paren) = self.last_rparen.as_mut() {
            paren.used = true;
        }
    }

    pub fn rparen_claimed(&self) -> bool {
        self.last_rparen.is_some_and(|paren| paren.used)
    }

    pub fn saw_semicolon(&mut self) {
        self.last_semicolon = Some(self.position);
    }

    /// True when a `;` was scanned one column before the current position.
    pub fn semicolon_just_seen(&self) -> bool {
        self.last_semicolon.is_some() && self.last_semicolon == self.position.previous_column()
    }

    pub fn saw_end_marker(&mut self) {
        self.has_end = true;
    }

    pub fn has_end_marker(&self) -> bool {
        self.has_end
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Records a recoverable diagnostic at the current line.
    pub fn report(&mut self, message: impl Into<String>) {
        let diagnostic = ParseDiagnostic::new(self.position.line, message);
        tracing::warn!(line = diagnostic.line, message = %diagnostic.message, "parse diagnostic");
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<ParseDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_literal_families() {
        let mut cx = Context::new();
        assert!(!cx.raw_literal());
        for (opener, raw) in [
            ("'", true),
            ("\"", false),
            ("%q(", true),
            ("%w[", true),
            ("%i[", true),
            ("%Q(", false),
            ("%r{", false),
            ("%'", false),
            ("<<-'EOS'", true),
            ("<<EOS", false),
            (":'", true),
        ] {
            cx.push_delimiter(opener);
            assert_eq!(cx.raw_literal(), raw, "opener {opener}");
            cx.pop_delimiter().unwrap();
        }
    }

    #[test]
    fn test_pop_on_empty_stack_is_fatal() {
        let mut cx = Context::new();
        assert!(cx.pop_delimiter().is_err());
    }

    #[test]
    fn test_rparen_adjacency() {
        let mut cx = Context::new();
        cx.enter_event(Position::new(1, 5), None);
        cx.saw_rparen();
        cx.enter_event(Position::new(1, 6), None);
        assert!(cx.rparen_just_closed());
        assert!(!cx.rparen_claimed());
        cx.claim_rparen();
        assert!(cx.rparen_claimed());
        cx.enter_event(Position::new(2, 6), None);
        assert!(!cx.rparen_just_closed());
    }

    #[test]
    fn test_kwrest_flag_is_cleared_on_read() {
        let mut cx = Context::new();
        cx.saw_operator("**");
        assert!(cx.take_kwrest());
        assert!(!cx.take_kwrest());
        cx.saw_operator("=>");
        assert_eq!(cx.oneline_pattern(), Kind::MatchPattern);
        cx.saw_keyword("in");
        assert_eq!(cx.oneline_pattern(), Kind::TestPattern);
    }
}
