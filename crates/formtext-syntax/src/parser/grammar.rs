//! Grammar rules for form text.
//!
//! ```text
//! Document       := Item*
//! Item           := Block | BinaryProperty | Property | <stray token>
//! Block          := 'Begin' Ident? Item* 'End'
//! BinaryProperty := Ident '=' 'Begin' <content> 'End'
//! Property       := Ident '=' <tokens up to end of line>
//! ```

use crate::lexer::TokenKind;
use crate::parser::Parser;
use crate::syntax::SyntaxKind;

pub(crate) fn document(p: &mut Parser<'_>) {
    let m = p.start();
    while !p.at_end() {
        item(p);
    }
    m.complete(p, SyntaxKind::Document);
}

fn item(p: &mut Parser<'_>) {
    if p.at(TokenKind::KwBegin) {
        block(p);
    } else if p.at_property_start() {
        if p.peek_kind_n(2) == TokenKind::KwBegin {
            binary_property(p);
        } else {
            property(p);
        }
    } else if p.at(TokenKind::KwEnd) {
        stray(p, "unexpected End");
    } else {
        stray(p, "expected property or block");
    }
}

fn block(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();

    // The kind name must sit on the `Begin` line; a bare `Begin` opens
    // an anonymous group of child blocks.
    if p.at(TokenKind::Ident) && !p.newline_before_next() && !p.at_property_start() {
        p.bump();
    }

    loop {
        if p.at_end() {
            p.error("expected End");
            break;
        }
        if p.at(TokenKind::KwEnd) {
            p.bump();
            break;
        }
        item(p);
    }
    m.complete(p, SyntaxKind::Block);
}

fn binary_property(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();
    p.bump();
    p.bump();

    let content = p.start();
    let terminated = loop {
        if p.at(TokenKind::KwEnd) {
            break true;
        }
        // Blobs never contain blocks or property lines; meeting one means
        // the `End` went missing.
        if p.at_end() || p.at(TokenKind::KwBegin) || p.at_property_start() {
            break false;
        }
        p.bump();
    };
    content.complete(p, SyntaxKind::BinaryContent);

    if terminated {
        p.bump();
    } else {
        p.error("expected End");
    }
    m.complete(p, SyntaxKind::BinaryProperty);
}

fn property(p: &mut Parser<'_>) {
    let m = p.start();
    p.bump();
    p.bump();

    let value = p.start();
    while !p.at_end() && !p.newline_before_next() {
        p.bump();
    }
    value.complete(p, SyntaxKind::PropertyValue);
    m.complete(p, SyntaxKind::Property);
}

fn stray(p: &mut Parser<'_>, message: &str) {
    let m = p.start();
    p.error(message);
    p.bump();
    m.complete(p, SyntaxKind::ErrorNode);
}
