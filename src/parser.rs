use alloc::string::String;
use std::io::Read;

use crate::builder::build_node;
use crate::halt::Halt;
use crate::reader::Source;
use crate::{Error, NodeEvent, NodeRef, ParserState, ScanError, SymbolId, SymbolTable};

/// Switches passed through to the scanner. The graph builder does not
/// interpret them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParserConfig {
    /// Resolve plain scalars to builtin types.
    pub implicit_typing: bool,
    /// Expand tags into full tag URIs.
    pub taguri_expansion: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            implicit_typing: true,
            taguri_expansion: true,
        }
    }
}

/// The character-level scanner that recognizes a document and drives the
/// graph builder.
///
/// A scanner pulls bytes with [`Session::read()`], reports each node with
/// [`Session::node()`] once all of its children have been reported, and
/// reports malformed input with [`Session::error()`]. Aliases are resolved by
/// the scanner: an alias is reported by reusing the index the builder
/// returned for the anchored node.
pub trait Scanner {
    /// Scan the next document.
    ///
    /// Returns the index of the document's root node, or `None` at the end of
    /// the stream. The return value is ignored once the session has halted.
    fn scan(&mut self, session: &mut Session<'_, '_>) -> Option<SymbolId>;
}

impl<F> Scanner for F
where
    F: FnMut(&mut Session<'_, '_>) -> Option<SymbolId>,
{
    fn scan(&mut self, session: &mut Session<'_, '_>) -> Option<SymbolId> {
        self(session)
    }
}

/// The parser state visible to a scanner during one [`Parser::parse()`] call.
pub struct Session<'p, 'r> {
    source: &'p mut Source<'r>,
    symbols: &'p mut SymbolTable,
    halt: &'p mut Halt,
    config: &'p ParserConfig,
}

impl<'p, 'r> Session<'p, 'r> {
    pub fn config(&self) -> &ParserConfig {
        self.config
    }

    /// Has the parse failed? Once true, every further call on the session is
    /// a no-op and the scanner should return as soon as it can.
    pub fn is_halted(&self) -> bool {
        self.halt.is_halted()
    }

    /// The nodes completed so far in this document.
    pub fn symbols(&self) -> &SymbolTable {
        self.symbols
    }

    /// Build the node described by `event` and return its index.
    ///
    /// Returns `None` if the parser has halted, or if building the node
    /// failed, in which case the parser halts.
    pub fn node(&mut self, event: &NodeEvent<'_>) -> Option<SymbolId> {
        if self.halt.is_halted() {
            return None;
        }
        match build_node(self.symbols, event) {
            Ok(id) => Some(id),
            Err(err) => {
                self.halt.trip(err.into());
                None
            }
        }
    }

    /// Report malformed input and halt. Ignored if the parser has already
    /// halted.
    pub fn error(&mut self, message: impl Into<String>, line: usize, column: usize) {
        if self.halt.is_halted() {
            return;
        }
        self.halt.trip(Error::Scan(ScanError {
            message: message.into(),
            line,
            column,
        }));
    }

    /// Fill `buf` after its first `skip` still-unconsumed bytes, requesting at
    /// most `buf.len() - skip` new bytes from the input.
    ///
    /// Returns the number of valid bytes in `buf`. A result equal to `skip`
    /// means no more input is available. A failed or overlong read, or a
    /// `skip` larger than `buf`, halts the parser and also returns `skip`.
    pub fn read(&mut self, buf: &mut [u8], skip: usize) -> usize {
        if self.halt.is_halted() {
            return skip;
        }
        match self.source.fill(buf, skip) {
            Ok(filled) => filled,
            Err(err) => {
                self.halt.trip(err.into());
                skip
            }
        }
    }
}

/// The parser structure.
///
/// Each call to [`Parser::parse()`] runs the scanner over one document and
/// returns its root node. A parser is single-threaded and not reentrant;
/// independent parsers share nothing.
pub struct Parser<'r, S> {
    scanner: S,
    source: Source<'r>,
    config: ParserConfig,
    parsing: bool,
    halt: Halt,
}

impl<'r, S: Scanner> Parser<'r, S> {
    /// Create a parser.
    pub fn new(scanner: S) -> Parser<'r, S> {
        Self::with_config(scanner, ParserConfig::default())
    }

    pub fn with_config(scanner: S, config: ParserConfig) -> Parser<'r, S> {
        Parser {
            scanner,
            source: Source::default(),
            config,
            parsing: false,
            halt: Halt::default(),
        }
    }

    /// Set a string input.
    pub fn set_input_string(&mut self, input: &'r [u8]) {
        self.source = Source::Bytes(input);
    }

    /// Set a generic input handler.
    pub fn set_input(&mut self, input: &'r mut dyn Read) {
        self.source = Source::Reader(input);
    }

    pub fn has_input(&self) -> bool {
        self.source.is_set()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn implicit_typing(&self) -> bool {
        self.config.implicit_typing
    }

    pub fn taguri_expansion(&self) -> bool {
        self.config.taguri_expansion
    }

    pub fn state(&self) -> ParserState {
        self.halt.state()
    }

    /// True once the stream is exhausted or the parser has failed.
    pub fn is_eof(&self) -> bool {
        self.halt.is_halted()
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut S {
        &mut self.scanner
    }

    /// Parse the input stream and produce the root node of the next document.
    ///
    /// Call this function subsequently to produce the documents of the
    /// stream. `Ok(None)` means there are no more documents.
    ///
    /// The first call after a failure returns the error; every later call
    /// returns `Ok(None)`.
    ///
    /// If the scanner panicked during an earlier call, that call never
    /// finished. The next call halts the parser and reports the failure
    /// recorded before the panic, or [`Error::Reentrancy`] if there was none.
    pub fn parse(&mut self) -> Result<Option<NodeRef>, Error> {
        if self.parsing {
            self.parsing = false;
            self.halt.trip(Error::Reentrancy);
            return self.take_failure();
        }
        if self.halt.is_halted() {
            return Ok(None);
        }

        let mut symbols = SymbolTable::new();
        tracing::debug!("parsing document");
        self.parsing = true;
        let root = {
            let mut session = Session {
                source: &mut self.source,
                symbols: &mut symbols,
                halt: &mut self.halt,
                config: &self.config,
            };
            self.scanner.scan(&mut session)
        };
        self.parsing = false;

        if self.halt.is_halted() {
            return self.take_failure();
        }
        let Some(root) = root else {
            self.halt.end_of_stream();
            return Ok(None);
        };

        let nodes = symbols.len();
        match symbols.into_root(root) {
            Ok(node) => {
                tracing::debug!(nodes, root = root.index(), kind = %node.kind(), "parsed document");
                Ok(Some(node))
            }
            Err(err) => {
                self.halt.trip(err.into());
                self.take_failure()
            }
        }
    }

    fn take_failure(&mut self) -> Result<Option<NodeRef>, Error> {
        match self.halt.take_cause() {
            Some(err) => Err(err),
            None => Ok(None),
        }
    }
}

impl<'r, S: Scanner> Iterator for Parser<'r, S> {
    type Item = Result<NodeRef, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reads the whole input and reports it as one scalar per document.
    struct WholeInput;

    impl Scanner for WholeInput {
        fn scan(&mut self, session: &mut Session<'_, '_>) -> Option<SymbolId> {
            let mut buf = [0; 4];
            let mut content = Vec::new();
            loop {
                let n = session.read(&mut buf, 0);
                if n == 0 {
                    break;
                }
                content.extend_from_slice(&buf[..n]);
            }
            if content.is_empty() {
                return None;
            }
            session.node(&NodeEvent::scalar(&content))
        }
    }

    #[test]
    fn config_defaults() {
        let parser = Parser::new(WholeInput);
        assert!(parser.implicit_typing());
        assert!(parser.taguri_expansion());
        assert!(!parser.has_input());
        assert!(!parser.is_eof());

        let config = ParserConfig {
            implicit_typing: false,
            ..Default::default()
        };
        let parser = Parser::with_config(WholeInput, config);
        assert!(!parser.implicit_typing());
        assert!(parser.taguri_expansion());
    }

    #[test]
    fn no_input_is_end_of_stream() {
        let mut parser = Parser::new(WholeInput);
        assert!(parser.parse().unwrap().is_none());
        assert!(parser.is_eof());
        assert_eq!(parser.state(), ParserState::Halted);
    }

    #[test]
    fn session_sees_completed_nodes() {
        let mut lens = Vec::new();
        let mut parser = Parser::new(|session: &mut Session<'_, '_>| -> Option<SymbolId> {
            if !lens.is_empty() {
                return None;
            }
            lens.push(session.symbols().len());
            let a = session.node(&NodeEvent::scalar(b"a"))?;
            lens.push(session.symbols().len());
            let seq = session.node(&NodeEvent::sequence(&[a]))?;
            lens.push(session.symbols().len());
            let item = session.symbols().get(seq)?.as_sequence()?.get(0)?.clone();
            lens.push(usize::from(item.as_scalar()?.value() == b"a"));
            Some(seq)
        });
        assert!(parser.parse().unwrap().is_some());
        assert!(parser.parse().unwrap().is_none());
        drop(parser);
        assert_eq!(lens, [0, 1, 2, 1]);
    }

    #[test]
    fn string_input() {
        let mut parser = Parser::new(WholeInput);
        parser.set_input_string(b"hello, world");
        let root = parser.parse().unwrap().unwrap();
        assert_eq!(root.as_scalar().unwrap().value(), b"hello, world");
        assert!(parser.parse().unwrap().is_none());
        assert!(parser.is_eof());
    }
}
