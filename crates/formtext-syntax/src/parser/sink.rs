//! Sink for converting parser events into a syntax tree.
//!
//! The sink takes the flat event stream and builds a proper `rowan` green tree.

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax::SyntaxKind;

/// Builds a syntax tree from parser events.
pub struct Sink<'t, 'src> {
    tokens: &'t [Token],
    source: &'src str,
    events: Vec<Event>,
    cursor: usize,
    builder: rowan::GreenNodeBuilder<'static>,
}

impl<'t, 'src> Sink<'t, 'src> {
    /// Creates a new sink.
    pub fn new(tokens: &'t [Token], source: &'src str, events: Vec<Event>) -> Self {
        Self {
            tokens,
            source,
            events,
            cursor: 0,
            builder: rowan::GreenNodeBuilder::new(),
        }
    }

    /// Consumes the sink and returns the green tree.
    pub fn finish(mut self) -> rowan::GreenNode {
        let events = std::mem::take(&mut self.events);
        let last = events.len().saturating_sub(1);
        for (index, event) in events.into_iter().enumerate() {
            match event {
                Event::Start { kind } => {
                    self.builder.start_node(kind.into());
                }
                Event::Token { kind } => {
                    self.eat_trivia();
                    self.token(kind);
                }
                Event::Finish => {
                    // Trailing trivia belongs inside the root so nothing is lost.
                    if index == last {
                        self.eat_trivia();
                    }
                    self.builder.finish_node();
                }
                Event::Placeholder => {}
            }
        }

        self.builder.finish()
    }

    /// Adds trivia (whitespace, line breaks) to the tree.
    fn eat_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.cursor) {
            if !token.kind.is_trivia() {
                break;
            }
            self.token(SyntaxKind::from(token.kind));
        }
    }

    /// Adds a token to the tree.
    fn token(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.tokens.get(self.cursor) {
            let text = &self.source[usize::from(token.range.start())..usize::from(token.range.end())];
            self.builder.token(kind.into(), text);
            self.cursor += 1;
        }
    }
}
