//! Tab completion for the REPL: case-insensitive prefix match over
//! every symbol name interned so far (builtins, special forms, and
//! anything the user has `DEFINE`d). Hinting, validation, and
//! highlighting are left as no-ops.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared with the REPL loop, which refreshes it from the interned
/// symbol table after each top-level form (new `DEFINE`s should be
/// completable immediately).
pub struct SymbolCompleter {
    names: Rc<RefCell<Vec<String>>>,
}

impl SymbolCompleter {
    pub fn new(names: Rc<RefCell<Vec<String>>>) -> Self {
        SymbolCompleter { names }
    }

    fn word_start(line: &str, pos: usize) -> usize {
        line[..pos]
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == '\'' || c == '`' || c == ',')
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

impl Completer for SymbolCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = Self::word_start(line, pos);
        let prefix = &line[start..pos];
        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }
        let upper = prefix.to_ascii_uppercase();
        let candidates = self
            .names
            .borrow()
            .iter()
            .filter(|name| name.starts_with(&upper))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for SymbolCompleter {
    type Hint = String;
}

impl Highlighter for SymbolCompleter {}

impl Validator for SymbolCompleter {}

impl Helper for SymbolCompleter {}

#[cfg(test)]
mod tests {
    use super::*;
    use rustyline::history::DefaultHistory;

    fn ctx() -> (DefaultHistory,) {
        (DefaultHistory::new(),)
    }

    #[test]
    fn completes_matching_prefix_case_insensitively() {
        let names = Rc::new(RefCell::new(vec!["CAR".to_string(), "CDR".to_string(), "CONS".to_string()]));
        let completer = SymbolCompleter::new(names);
        let (history,) = ctx();
        let context = Context::new(&history);
        let (start, candidates) = completer.complete("(ca", 3, &context).unwrap();
        assert_eq!(start, 1);
        let displays: Vec<_> = candidates.iter().map(|p| p.display.clone()).collect();
        assert_eq!(displays, vec!["CAR".to_string()]);
    }

    #[test]
    fn no_candidates_for_empty_prefix() {
        let names = Rc::new(RefCell::new(vec!["CAR".to_string()]));
        let completer = SymbolCompleter::new(names);
        let (history,) = ctx();
        let context = Context::new(&history);
        let (_, candidates) = completer.complete("(", 1, &context).unwrap();
        assert!(candidates.is_empty());
    }
}
