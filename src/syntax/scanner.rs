// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Walks the token stream of one unfolded logical line and produces the
//! shallow split `name (;param)* : value`, parsing parameter pairs (including
//! quoted strings and RFC 6868 caret escapes) but leaving the value untyped.
//!
//! ```text
//! contentline = name *(";" param) ":" value
//! ```

use std::iter::Peekable;

use crate::component::{ParamValue, Parameter};
use crate::error::{Severity, ValidationError, codes};
use crate::syntax::lexer::{Token, tokenize};

/// A single logical parsed line: the shallow token consumed by the assembler.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// The full unfolded line, for diagnostics.
    pub raw: String,
    /// Property (or BEGIN/END) name as written.
    pub name: String,
    /// Parsed parameters in wire order, names uppercased.
    pub parameters: Vec<Parameter>,
    /// The raw value portion after the first unquoted `:`.
    pub value: String,
    /// 1-based physical line number of the line's first physical line.
    pub line_number: usize,
}

/// Scan result: the content line plus lenient-mode recovery notes.
#[derive(Debug)]
pub(crate) struct ScannedLine {
    pub line: ContentLine,
    pub warnings: Vec<ValidationError>,
}

/// Scan one unfolded logical line.
///
/// Recoverable deviations are returned as `Err` with `Error` severity; the
/// caller escalates or records them according to mode. Lenient recoveries
/// (dropped control characters, preserved caret literals) come back as
/// warnings alongside the line.
pub(crate) fn scan_line(
    text: &str,
    number: usize,
    strict: bool,
) -> Result<ScannedLine, ValidationError> {
    let mut scanner = Scanner {
        tokens: tokenize(text).peekable(),
        strict,
        warnings: Vec::new(),
        raw: text,
        number,
    };

    let line = scanner.content_line()?;
    Ok(ScannedLine {
        line,
        warnings: scanner.warnings,
    })
}

struct Scanner<'src, I: Iterator<Item = Token<'src>>> {
    tokens: Peekable<I>,
    strict: bool,
    warnings: Vec<ValidationError>,
    raw: &'src str,
    number: usize,
}

impl<'src, I: Iterator<Item = Token<'src>>> Scanner<'src, I> {
    fn error(&self, code: &'static str, message: impl Into<String>) -> ValidationError {
        ValidationError::new(code, message, Severity::Error).at_line(self.raw, self.number)
    }

    fn content_line(&mut self) -> Result<ContentLine, ValidationError> {
        let name = self.word_run();
        if name.is_empty() {
            return Err(self.error(
                codes::PARSE_INVALID_PROPERTY_NAME,
                "content line does not start with a property name",
            ));
        }

        let mut parameters = Vec::new();
        loop {
            match self.tokens.peek() {
                Some(Token::Semicolon) => {
                    self.tokens.next();
                    parameters.push(self.parameter()?);
                }
                Some(Token::Colon) => {
                    self.tokens.next();
                    let value = self.value_tail()?;
                    return Ok(ContentLine {
                        raw: self.raw.to_string(),
                        name,
                        parameters,
                        value,
                        line_number: self.number,
                    });
                }
                Some(token) => {
                    let found = token.to_string();
                    return Err(self.error(
                        codes::PARSE_INVALID_PROPERTY_FORMAT,
                        format!("expected ':' after property head, found {found}"),
                    ));
                }
                None => {
                    return Err(self.error(
                        codes::PARSE_INVALID_PROPERTY_FORMAT,
                        "content line has no ':' separator",
                    ));
                }
            }
        }
    }

    /// Collect a run of Word tokens into one name.
    fn word_run(&mut self) -> String {
        let mut name = String::new();
        while let Some(Token::Word(word)) = self.tokens.peek() {
            name.push_str(word);
            self.tokens.next();
        }
        name
    }

    /// ```text
    /// param = param-name "=" param-value *("," param-value)
    /// ```
    ///
    /// A pair without `=` is accepted with an empty value.
    fn parameter(&mut self) -> Result<Parameter, ValidationError> {
        let name = self.word_run();
        if !valid_parameter_name(&name) {
            return Err(self.error(
                codes::PARSE_INVALID_PARAMETER_FORMAT,
                format!("invalid parameter name {name:?}"),
            ));
        }

        match self.tokens.peek() {
            Some(Token::Equal) => {
                self.tokens.next();
            }
            // Value-less pair, e.g. `;X-FLAG;`
            Some(Token::Semicolon | Token::Colon) => {
                return Ok(Parameter {
                    name: name.to_ascii_uppercase(),
                    values: vec![ParamValue::new("")],
                });
            }
            Some(token) => {
                let found = token.to_string();
                return Err(self.error(
                    codes::PARSE_INVALID_PARAMETER_FORMAT,
                    format!("expected '=' after parameter {name:?}, found {found}"),
                ));
            }
            None => {
                return Err(self.error(
                    codes::PARSE_INVALID_PARAMETER_FORMAT,
                    format!("parameter {name:?} is missing both '=' and a value"),
                ));
            }
        }

        let mut values = Vec::new();
        loop {
            let value = match self.tokens.peek() {
                Some(Token::DQuote) => self.quoted_value()?,
                _ => self.bare_value()?,
            };
            values.push(value);

            match self.tokens.peek() {
                Some(Token::Comma) => {
                    self.tokens.next();
                }
                _ => break,
            }
        }

        Ok(Parameter {
            name: name.to_ascii_uppercase(),
            values,
        })
    }

    /// A double-quoted parameter value; the inner bytes are RFC 6868 decoded.
    fn quoted_value(&mut self) -> Result<ParamValue, ValidationError> {
        self.tokens.next(); // opening quote

        let mut raw = String::new();
        loop {
            match self.tokens.next() {
                Some(Token::DQuote) => break,
                Some(Token::Error) => self.control_character()?,
                Some(token) => raw.push_str(token.text()),
                None => {
                    return Err(self.error(
                        codes::PARSE_UNCLOSED_QUOTED_STRING,
                        "quoted parameter value is missing its closing quote",
                    ));
                }
            }
        }

        let value = self.decode_rfc6868(&raw)?;
        Ok(ParamValue {
            value,
            quoted: true,
        })
    }

    /// An unquoted parameter value: runs until `;`, `:`, `,`, or `=`.
    fn bare_value(&mut self) -> Result<ParamValue, ValidationError> {
        let mut value = String::new();
        while let Some(token) = self.tokens.peek() {
            match token {
                Token::Semicolon | Token::Colon | Token::Comma | Token::Equal => break,
                Token::Error => {
                    self.tokens.next();
                    self.control_character()?;
                }
                token => {
                    value.push_str(token.text());
                    self.tokens.next();
                }
            }
        }
        Ok(ParamValue {
            value,
            quoted: false,
        })
    }

    /// Everything after the `:`.
    fn value_tail(&mut self) -> Result<String, ValidationError> {
        let mut value = String::new();
        while let Some(token) = self.tokens.next() {
            match token {
                Token::Error => self.control_character()?,
                token => value.push_str(token.text()),
            }
        }
        Ok(value)
    }

    /// RFC 6868: `^n`/`^N` is LF, `^^` is `^`, `^'` is `"`. Any other caret
    /// sequence is an error in strict mode; lenient mode keeps the literal.
    fn decode_rfc6868(&mut self, raw: &str) -> Result<String, ValidationError> {
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '^' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n' | 'N') => out.push('\n'),
                Some('^') => out.push('^'),
                Some('\'') => out.push('"'),
                other => {
                    let literal = other.map_or_else(|| "^".to_string(), |c| format!("^{c}"));
                    let err = self.error(
                        codes::PARSE_INVALID_RFC6868,
                        format!("invalid caret escape {literal:?} in parameter value"),
                    );
                    if self.strict {
                        return Err(err);
                    }
                    self.warnings.push(ValidationError {
                        severity: Severity::Warning,
                        ..err
                    });
                    out.push_str(&literal);
                }
            }
        }
        Ok(out)
    }

    /// A control character reached the scanner: strict fails the line,
    /// lenient drops the byte with a warning.
    fn control_character(&mut self) -> Result<(), ValidationError> {
        let err = self.error(
            codes::PARSE_INVALID_PROPERTY_FORMAT,
            "control character in content line",
        );
        if self.strict {
            return Err(err);
        }
        self.warnings.push(ValidationError {
            severity: Severity::Warning,
            ..err
        });
        Ok(())
    }
}

/// `[A-Za-z][A-Za-z0-9-]*`
fn valid_parameter_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// RFC 6868 encode, applied when the writer quotes a parameter value:
/// CRLF/CR first become LF, then `^` -> `^^`, LF -> `^n`, `"` -> `^'`.
#[must_use]
pub fn encode_rfc6868(value: &str) -> String {
    let normalized = value.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .replace('^', "^^")
        .replace('\n', "^n")
        .replace('"', "^'")
}
