//! # Event log builder
//!
//! Records event streams the way Ripper would emit them, bottom-up, so
//! integration tests can describe a Ruby snippet as a sequence of events.

#![allow(dead_code)]

use rbcst::{normalize_events, Arg, Event, Normalized};

#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
    line: usize,
    column: usize,
}

impl EventLog {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            line: 1,
            column: 0,
        }
    }

    /// Sets the lexer position for the events that follow.
    pub fn at(&mut self, line: usize, column: usize) -> &mut Self {
        self.line = line;
        self.column = column;
        self
    }

    /// Records a parser event and returns a reference to its result.
    pub fn emit(&mut self, name: &str, args: Vec<Arg>) -> Arg {
        self.events
            .push(Event::new(name, args).at(self.line, self.column));
        Arg::reference(self.events.len() - 1)
    }

    /// Records a scanner event for `text` at the current position.
    pub fn scan(&mut self, name: &str, text: &str) -> Arg {
        self.events.push(
            Event::new(name, vec![Arg::text(text)])
                .at(self.line, self.column)
                .with_token(text),
        );
        Arg::reference(self.events.len() - 1)
    }

    pub fn ident(&mut self, name: &str) -> Arg {
        self.scan("ident", name)
    }

    pub fn int(&mut self, text: &str) -> Arg {
        self.scan("int", text)
    }

    pub fn var_field(&mut self, name: &str) -> Arg {
        let ident = self.ident(name);
        self.emit("var_field", vec![ident])
    }

    pub fn var_ref(&mut self, name: &str) -> Arg {
        let ident = self.ident(name);
        self.emit("var_ref", vec![ident])
    }

    /// `stmts_new` followed by one `stmts_add` per statement.
    pub fn stmts(&mut self, statements: Vec<Arg>) -> Arg {
        let mut list = self.emit("stmts_new", vec![]);
        for statement in statements {
            list = self.emit("stmts_add", vec![list, statement]);
        }
        list
    }

    pub fn args(&mut self, values: Vec<Arg>) -> Arg {
        let mut list = self.emit("args_new", vec![]);
        for value in values {
            list = self.emit("args_add", vec![list, value]);
        }
        list
    }

    /// Closes the stream with a `program` over `statements`.
    pub fn program(&mut self, statements: Vec<Arg>) -> Arg {
        let stmts = self.stmts(statements);
        self.emit("program", vec![stmts])
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn normalize(&self) -> Normalized {
        normalize_events(self.events.clone()).expect("event stream normalizes")
    }

    pub fn render(&self) -> String {
        self.normalize().render()
    }

    /// The stream as JSON lines.
    pub fn to_json_lines(&self) -> String {
        self.events
            .iter()
            .map(|event| serde_json::to_string(event).expect("event serializes"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builds `x = 1`.
pub fn assignment_log() -> EventLog {
    let mut log = EventLog::new();
    let target = log.var_field("x");
    log.at(1, 4);
    let value = log.int("1");
    let assign = log.emit("assign", vec![target, value]);
    log.program(vec![assign]);
    log
}
