// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Token lexer for a single unfolded content line.

use std::fmt::{self, Display};

use logos::Logos;

/// Token emitted by the content-line lexer.
///
/// Control characters (other than HTAB) have no token of their own and come
/// out as [`Token::Error`].
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
pub enum Token<'src> {
    /// Double quote (`"`).
    #[token(r#"""#)]
    DQuote,

    /// Comma (`,`).
    #[token(",")]
    Comma,

    /// Colon (`:`).
    #[token(":")]
    Colon,

    /// Semicolon (`;`).
    #[token(";")]
    Semicolon,

    /// Equal sign (`=`).
    #[token("=")]
    Equal,

    /// Runs of printable ASCII outside the structural characters.
    #[regex(r#"[\t !#$%&'()*+./<>?@\[\\\]\^`\{|\}~]+"#)]
    Symbol(&'src str),

    /// Runs of `0-9 A-Z a-z _ -`.
    #[regex("[0-9A-Za-z_-]+")]
    Word(&'src str),

    /// Runs of non-ASCII UTF-8.
    #[regex(r#"[^\x00-\x7F]+"#)]
    UnicodeText(&'src str),

    /// Anything the lexer cannot match (control characters).
    Error,
}

impl Token<'_> {
    /// The wire text of this token; empty for [`Token::Error`].
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Token::Word(s) | Token::Symbol(s) | Token::UnicodeText(s) => s,
            Token::DQuote => "\"",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::Equal => "=",
            Token::Error => "",
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Symbol(s) => write!(f, "Symbol({s})"),
            Token::Word(s) => write!(f, "Word({s})"),
            Token::UnicodeText(s) => write!(f, "UnicodeText({s})"),
            Token::Error => write!(f, "Error"),
            other => write!(f, "{:?}", other.text()),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Tokenize one unfolded logical line.
pub fn tokenize(line: &str) -> impl Iterator<Item = Token<'_>> {
    Token::lexer(line).map(|tok| tok.unwrap_or(Token::Error))
}
