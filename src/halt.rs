use crate::Error;

/// The parser states.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ParserState {
    /// Documents may still be parsed.
    #[default]
    Active,
    /// Expect nothing. Set by the first failure or by the end of the stream,
    /// and never cleared.
    Halted,
}

/// The sticky failure flag shared by the builder, the source adapter and the
/// scanner's error callback for the lifetime of one parser.
#[derive(Default, Debug)]
pub(crate) struct Halt {
    state: ParserState,
    cause: Option<Error>,
}

impl Halt {
    pub(crate) fn is_halted(&self) -> bool {
        self.state == ParserState::Halted
    }

    pub(crate) fn state(&self) -> ParserState {
        self.state
    }

    /// Halt because of `cause`. Only the first cause is kept; anything
    /// reported after the parser has halted is dropped.
    pub(crate) fn trip(&mut self, cause: Error) {
        if self.is_halted() {
            tracing::debug!(%cause, "already halted, dropping error");
            return;
        }
        tracing::debug!(%cause, "halting");
        self.state = ParserState::Halted;
        self.cause = Some(cause);
    }

    /// Halt at the natural end of the stream. This is not an error.
    pub(crate) fn end_of_stream(&mut self) {
        if !self.is_halted() {
            tracing::debug!("end of stream");
            self.state = ParserState::Halted;
        }
    }

    /// Take the recorded cause, leaving the parser halted. Subsequent calls
    /// return `None`, so a failure is surfaced exactly once.
    pub(crate) fn take_cause(&mut self) -> Option<Error> {
        self.cause.take()
    }
}
