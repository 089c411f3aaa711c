//! Event streams: the serialized form of a Ripper run and its replay.
//!
//! A stream is either one JSON array of events or one JSON event per line.
//! Arguments refer to earlier results with `{"ref": n}`, where `n` is the
//! zero-based index of the producing event. Each result may be consumed once.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::normalize::{Normalized, Normalizer, Position, Value};
use crate::{err_msg, CstError};

/// One recorded parser event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event: String,
    #[serde(default)]
    pub args: Vec<Arg>,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Event {
    pub fn new(event: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            event: event.into(),
            args,
            line: 0,
            column: 0,
            token: None,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// A serialized event argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    Nil,
    Bool(bool),
    Text(String),
    Symbol { sym: String },
    Ref {
        #[serde(rename = "ref")]
        index: usize,
    },
    List(Vec<Arg>),
}

impl Arg {
    pub fn text(text: impl Into<String>) -> Self {
        Arg::Text(text.into())
    }

    pub fn sym(name: impl Into<String>) -> Self {
        Arg::Symbol { sym: name.into() }
    }

    pub fn reference(index: usize) -> Self {
        Arg::Ref { index }
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parses a JSON array of events or JSON lines. In line mode blank lines
/// and `#` comments are skipped.
pub fn parse_events(text: &str) -> Result<Vec<Event>, CstError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str(text)
            .map_err(|e| err_msg!(Stream, "invalid event array: {}", e));
    }
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(number, line)| {
            serde_json::from_str(line).map_err(|e| err_msg!(Stream, "line {}: {}", number + 1, e))
        })
        .collect()
}

pub fn read_events(path: &Path) -> Result<Vec<Event>, CstError> {
    let text = std::fs::read_to_string(path).map_err(|source| CstError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_events(&text)
}

// ============================================================================
// REPLAY
// ============================================================================

/// Results of events replayed so far. A consumed slot is `None`.
struct Results {
    slots: Vec<Option<Value>>,
}

impl Results {
    fn resolve(&mut self, arg: Arg) -> Result<Value, CstError> {
        Ok(match arg {
            Arg::Nil => Value::Nil,
            Arg::Bool(flag) => Value::Bool(flag),
            Arg::Text(text) => Value::Text(text),
            Arg::Symbol { sym } => Value::Symbol(sym),
            Arg::Ref { index } => self.take(index)?,
            Arg::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| self.resolve(item))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }

    fn take(&mut self, index: usize) -> Result<Value, CstError> {
        let produced = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            err_msg!(
                Stream,
                "reference to event {} which has not fired ({} so far)",
                index,
                produced
            )
        })?;
        slot.take().ok_or_else(|| err_msg!(Stream, "result of event {} consumed twice", index))
    }
}

/// Replays `events` through a fresh normalizer. The last event's result is
/// the root of the tree.
pub fn normalize_events(events: Vec<Event>) -> Result<Normalized, CstError> {
    let mut normalizer = Normalizer::new();
    let mut results = Results {
        slots: Vec::with_capacity(events.len()),
    };
    for (index, event) in events.into_iter().enumerate() {
        let Event {
            event: name,
            args,
            line,
            column,
            token,
        } = event;
        let value = args
            .into_iter()
            .map(|arg| results.resolve(arg))
            .collect::<Result<Vec<_>, _>>()
            .and_then(|args| normalizer.handle(&name, args, Position::new(line, column), token))
            .map_err(|e| e.in_event(index, &name, line, column))?;
        results.slots.push(Some(value));
    }
    let root = results.slots.pop().flatten().unwrap_or_default();
    normalizer.finish(root)
}

/// Parses and replays an event stream.
pub fn normalize_str(text: &str) -> Result<Normalized, CstError> {
    normalize_events(parse_events(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_forms() {
        let event: Event = serde_json::from_str(
            r#"{"event":"x","args":[null,true,"t",{"sym":"call"},{"ref":3},[null]],"line":2}"#,
        )
        .unwrap();
        assert_eq!(
            event.args,
            vec![
                Arg::Nil,
                Arg::Bool(true),
                Arg::text("t"),
                Arg::sym("call"),
                Arg::reference(3),
                Arg::List(vec![Arg::Nil]),
            ]
        );
        assert_eq!((event.line, event.column, event.token), (2, 0, None));
    }

    #[test]
    fn test_json_lines_skip_comments() {
        let events = parse_events("# recorded\n\n{\"event\":\"stmts_new\"}\n").unwrap();
        assert_eq!(events, vec![Event::new("stmts_new", vec![])]);
    }

    #[test]
    fn test_bad_line_names_its_number() {
        let err = parse_events("{\"event\":\"a\"}\nnot json\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_double_consumption_is_fatal() {
        let events = vec![
            Event::new("stmts_new", vec![]),
            Event::new("program", vec![Arg::reference(0)]),
            Event::new("program", vec![Arg::reference(0)]),
        ];
        let err = normalize_events(events).unwrap_err();
        assert_eq!(err.code_str(), "rbcst::event");
        assert!(format!("{:?}", miette::Report::new(err)).contains("consumed twice"));
    }

    #[test]
    fn test_forward_reference_is_fatal() {
        let events = vec![Event::new("program", vec![Arg::reference(1)])];
        assert!(normalize_events(events).is_err());
    }

    #[test]
    fn test_empty_stream_has_no_tree() {
        let out = normalize_str("").unwrap();
        assert_eq!(out.tree, None);
        assert_eq!(out.render(), "\n");
    }
}
