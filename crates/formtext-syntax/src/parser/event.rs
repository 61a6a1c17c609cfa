//! Parser events.
//!
//! The parser produces a flat stream of events that are later converted
//! into a syntax tree by the sink.

use crate::syntax::SyntaxKind;

/// An event produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start a new node.
    Start {
        /// The kind of node being started.
        kind: SyntaxKind,
    },
    /// Add the next non-trivia token to the current node.
    Token {
        /// The kind to record the token as.
        kind: SyntaxKind,
    },
    /// Finish the current node.
    Finish,
    /// Placeholder event (replaced when its marker completes).
    Placeholder,
}

impl Event {
    /// Creates a start event.
    #[must_use]
    pub fn start(kind: SyntaxKind) -> Self {
        Self::Start { kind }
    }

    /// Creates a token event.
    #[must_use]
    pub fn token(kind: SyntaxKind) -> Self {
        Self::Token { kind }
    }
}
