//! `formtext-syntax` - Lexer, parser, and concrete syntax tree for form text files.
//!
//! Form definitions exported from (and imported into) the desktop database
//! host are plain text made of nested `Begin <Kind> ... End` blocks,
//! `Key =value` property lines, and binary properties such as
//! `GUID = Begin 0x... End` whose content is hex-encoded.
//!
//! - **Lexer**: Tokenizes the text into a lossless stream of tokens
//! - **Parser**: Builds an error-tolerant concrete syntax tree (CST)
//! - **Accessors**: Typed views over blocks, properties, and binary properties
//!
//! Nothing here knows what a NameMap means; higher layers locate the ranges
//! they want to rewrite and splice new text in with [`edit::apply_edits`].
//!
//! # Example
//!
//! ```
//! use formtext_syntax::ast::BinaryProperty;
//! use formtext_syntax::parser::parse;
//!
//! let source = "Begin Form\n    GUID = Begin\n        0x00\n    End\nEnd\n";
//! let parsed = parse(source);
//! assert!(parsed.ok());
//!
//! let guid = parsed
//!     .syntax()
//!     .descendants()
//!     .find_map(BinaryProperty::cast)
//!     .unwrap();
//! assert_eq!(guid.key_text().as_deref(), Some("GUID"));
//! assert_eq!(guid.content_text().trim(), "0x00");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod edit;
pub mod lexer;
pub mod lines;
pub mod parser;
pub mod syntax;

pub use lexer::{lex, Lexer, Token, TokenKind};
pub use syntax::{FormLanguage, SyntaxKind, SyntaxNode, SyntaxToken};
