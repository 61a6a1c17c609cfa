//! Main parser implementation.

use crate::lexer::{lex, Token, TokenKind};
use crate::parser::event::Event;
use crate::parser::grammar;
use crate::parser::sink::Sink;
use crate::parser::source::Source;
use crate::parser::{Parse, ParseError};
use crate::syntax::SyntaxKind;
use drop_bomb::DropBomb;
use text_size::TextRange;

/// Parses source text into a syntax tree.
#[must_use]
pub fn parse(source: &str) -> Parse {
    let tokens = lex(source);
    let mut parser = Parser::new(&tokens);
    grammar::document(&mut parser);
    let (events, errors) = parser.finish();

    let green_node = Sink::new(&tokens, source, events).finish();

    Parse { green_node, errors }
}

/// The parser state.
pub(crate) struct Parser<'t> {
    source: Source<'t>,
    events: Vec<Event>,
    errors: Vec<ParseError>,
}

pub(crate) struct Marker {
    pos: usize,
    bomb: DropBomb,
}

impl Marker {
    pub(crate) fn complete(mut self, parser: &mut Parser<'_>, kind: SyntaxKind) {
        self.bomb.defuse();
        parser.events[self.pos] = Event::start(kind);
        parser.events.push(Event::Finish);
    }
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            source: Source::new(tokens),
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> (Vec<Event>, Vec<ParseError>) {
        (self.events, self.errors)
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    pub(crate) fn current(&self) -> TokenKind {
        self.source.current()
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(crate) fn at_end(&self) -> bool {
        self.source.at_end()
    }

    pub(crate) fn peek_kind_n(&self, n: usize) -> TokenKind {
        self.source.peek_kind_n(n)
    }

    /// Returns `true` at the start of a `Key =` line.
    pub(crate) fn at_property_start(&self) -> bool {
        self.at(TokenKind::Ident) && self.peek_kind_n(1) == TokenKind::Eq
    }

    pub(crate) fn newline_before_next(&self) -> bool {
        self.source.newline_before_next()
    }

    pub(crate) fn bump(&mut self) {
        let kind = self.source.current();
        self.events.push(Event::token(SyntaxKind::from(kind)));
        self.source.bump();
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            bomb: DropBomb::new("uncompleted marker"),
        }
    }

    pub(crate) fn error(&mut self, message: &str) {
        let range = self.source.current_token().map_or_else(
            || TextRange::empty(self.source.end_offset()),
            |token| token.range,
        );

        self.errors.push(ParseError {
            message: message.to_string(),
            range,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let parse = parse("");
        assert!(parse.ok());
        assert_eq!(parse.syntax().kind(), SyntaxKind::Document);
    }

    #[test]
    fn test_parse_header_and_form() {
        let source = r#"Version =21
VersionRequired =20
Begin Form
    DefaultView =0
    GUID = Begin
        0x0123456789abcdef0123456789abcdef
    End
    Begin
        Begin Section
            Name ="Detail"
        End
    End
End
"#;
        let parse = parse(source);
        assert!(parse.ok(), "errors: {:?}", parse.errors());
        assert_eq!(parse.syntax().to_string(), source);
    }

    #[test]
    fn test_missing_block_end_is_reported() {
        let parse = parse("Begin Form\n    Width =100\n");
        assert!(!parse.ok());
        assert!(
            parse
                .errors()
                .iter()
                .any(|error| error.message == "expected End"),
            "errors: {:?}",
            parse.errors()
        );
    }

    #[test]
    fn test_stray_end_is_reported() {
        let parse = parse("Width =1\nEnd\n");
        assert!(parse
            .errors()
            .iter()
            .any(|error| error.message == "unexpected End"));
        assert_eq!(parse.syntax().to_string(), "Width =1\nEnd\n");
    }

    #[test]
    fn test_error_at_end_of_input_points_past_last_token() {
        let source = "Begin Form";
        let parse = parse(source);
        let error = &parse.errors()[0];
        assert_eq!(usize::from(error.range.start()), source.len());
        assert!(error.range.is_empty());
    }

    #[test]
    fn test_error_line_number_counts_any_line_break() {
        let source = "Width =1\r\nHeight =2\rEnd\n";
        let parse = parse(source);
        let error = &parse.errors()[0];
        assert_eq!(error.message, "unexpected End");
        assert_eq!(error.line_number(source), 3);
    }
}
