//! Console command tables and tokenized arguments.
//!
//! # Responsibility
//! - Hold the command map, static completion lists and completion functions
//!   that modules register into.
//! - Provide the tokenized argument shape handed to command handlers.
//!
//! # Invariants
//! - Every insert overwrites any previous entry with the same name.
//! - Tokenization keeps double-quoted segments as one token, quotes stripped.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("valid token regex"));

/// Ordered command tokens, e.g. `["param", "set", "ARMING_CHECK", "0"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    tokens: Vec<String>,
}

impl CommandArgs {
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a console line on whitespace, keeping `"quoted text"` together.
    pub fn parse(line: &str) -> Self {
        let tokens = TOKEN_RE
            .captures_iter(line)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().to_string())
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn first(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Tokens after the first one.
    pub fn rest(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Handler invoked when the dispatcher matches a registered command.
pub type CommandCallback = Rc<dyn Fn(&CommandArgs)>;

/// Dynamic completion source, given the partial word being completed.
pub type CompletionFn = Rc<dyn Fn(&str) -> Vec<String>>;

/// One command map entry: the `(callback, description)` pair.
#[derive(Clone)]
pub struct CommandEntry {
    pub callback: CommandCallback,
    pub description: String,
}

impl CommandEntry {
    pub fn new(callback: CommandCallback, description: impl Into<String>) -> Self {
        Self {
            callback,
            description: description.into(),
        }
    }

    pub fn invoke(&self, args: &CommandArgs) {
        (self.callback)(args)
    }
}

impl Debug for CommandEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandEntry")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Command, completion and completion-function maps.
#[derive(Default)]
pub struct CommandTable {
    commands: BTreeMap<String, CommandEntry>,
    completions: BTreeMap<String, Vec<String>>,
    completion_functions: BTreeMap<String, CompletionFn>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a command entry and, when given, its static completions.
    ///
    /// Returns the entry previously stored under `name`.
    pub fn add_command(
        &mut self,
        name: &str,
        entry: CommandEntry,
        completions: Option<Vec<String>>,
    ) -> Option<CommandEntry> {
        if let Some(completions) = completions {
            self.completions.insert(name.to_string(), completions);
        }
        self.commands.insert(name.to_string(), entry)
    }

    pub fn add_completion_function(
        &mut self,
        name: &str,
        callback: CompletionFn,
    ) -> Option<CompletionFn> {
        self.completion_functions.insert(name.to_string(), callback)
    }

    pub fn command(&self, name: &str) -> Option<CommandEntry> {
        self.commands.get(name).cloned()
    }

    pub fn completions(&self, name: &str) -> Option<Vec<String>> {
        self.completions.get(name).cloned()
    }

    pub fn completion_function(&self, name: &str) -> Option<CompletionFn> {
        self.completion_functions.get(name).cloned()
    }

    /// Sorted registered command names.
    pub fn command_names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Removes a command together with its static completions.
    pub fn remove_command(&mut self, name: &str) -> Option<CommandEntry> {
        self.completions.remove(name);
        self.commands.remove(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Debug for CommandTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.commands)
            .field("completions", &self.completions)
            .field(
                "completion_functions",
                &self.completion_functions.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandArgs, CommandEntry, CommandTable};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn parse_splits_on_whitespace() {
        let args = CommandArgs::parse("  param   set ARMING_CHECK 0 ");
        assert_eq!(args.tokens(), ["param", "set", "ARMING_CHECK", "0"]);
        assert_eq!(args.first(), Some("param"));
        assert_eq!(args.rest(), ["set", "ARMING_CHECK", "0"]);
    }

    #[test]
    fn parse_keeps_quoted_segments() {
        let args = CommandArgs::parse(r#"say "hello there" now"#);
        assert_eq!(args.tokens(), ["say", "hello there", "now"]);
    }

    #[test]
    fn parse_of_blank_line_is_empty() {
        let args = CommandArgs::parse("   ");
        assert!(args.is_empty());
        assert_eq!(args.first(), None);
        assert!(args.rest().is_empty());
    }

    #[test]
    fn add_command_overwrites_and_returns_previous() {
        let mut table = CommandTable::new();
        let first = CommandEntry::new(Rc::new(|_: &CommandArgs| {}), "first");
        let second = CommandEntry::new(Rc::new(|_: &CommandArgs| {}), "second");

        assert!(table.add_command("wp", first, None).is_none());
        let previous = table
            .add_command("wp", second, None)
            .expect("previous entry is returned");
        assert_eq!(previous.description, "first");
        assert_eq!(table.command("wp").expect("entry").description, "second");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn completions_are_only_written_when_supplied() {
        let mut table = CommandTable::new();
        let entry = CommandEntry::new(Rc::new(|_: &CommandArgs| {}), "waypoints");
        table.add_command("wp", entry.clone(), Some(vec!["<list|clear>".to_string()]));
        table.add_command("wp", entry, None);
        assert_eq!(
            table.completions("wp"),
            Some(vec!["<list|clear>".to_string()])
        );
    }

    #[test]
    fn entry_invoke_calls_callback() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let entry = CommandEntry::new(
            Rc::new(move |args: &CommandArgs| counter.set(counter.get() + args.len())),
            "count tokens",
        );
        entry.invoke(&CommandArgs::from_tokens(["a", "b"]));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn remove_command_drops_completions() {
        let mut table = CommandTable::new();
        table.add_command(
            "fence",
            CommandEntry::new(Rc::new(|_: &CommandArgs| {}), "fence"),
            Some(vec!["<list>".to_string()]),
        );
        assert!(table.remove_command("fence").is_some());
        assert!(table.command("fence").is_none());
        assert!(table.completions("fence").is_none());
    }
}
