// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! TEXT value type (RFC 5545 §3.3.11): escape handling in both directions.
//!
//! ```txt
//! ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
//! ```

use crate::error::{ValueError, codes};

/// Parse a comma-separated TEXT list, resolving escapes.
///
/// Unescaped commas separate values; `\\`, `\;`, `\,` produce the literal
/// character and both `\n` and `\N` produce LF. Any other escape, or a
/// trailing bare backslash, is an error.
pub fn parse_texts(raw: &str) -> Result<Vec<String>, ValueError> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\\') => current.push('\\'),
                Some(';') => current.push(';'),
                Some(',') => current.push(','),
                Some('n' | 'N') => current.push('\n'),
                Some(other) => {
                    return Err(ValueError::new(
                        codes::TYPE_TEXT,
                        format!("unknown escape \\{other} in text value"),
                    ));
                }
                None => {
                    return Err(ValueError::new(
                        codes::TYPE_TEXT,
                        "trailing backslash in text value",
                    ));
                }
            },
            ',' => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    values.push(current);

    Ok(values)
}

/// Escape one text value for the wire: backslash, semicolon, comma, and
/// newlines (CRLF, CR, LF all become `\n`).
#[must_use]
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str(r"\\"),
            ';' => out.push_str(r"\;"),
            ',' => out.push_str(r"\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(r"\n");
            }
            '\n' => out.push_str(r"\n"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn unescapes_rfc5545_sequences() {
        let cases = [
            (
                r"Project XYZ Final Review\nConference Room - 3B\nCome Prepared.",
                "Project XYZ Final Review\nConference Room - 3B\nCome Prepared.",
            ),
            (r"Hello\, World\; \N", "Hello, World; \n"),
            (r#""Quoted Text" and more"#, r#""Quoted Text" and more"#),
            (r"back\\slash", r"back\slash"),
            ("Unicode 字符串 🎉", "Unicode 字符串 🎉"),
        ];
        for (src, expected) in cases {
            assert_eq!(parse_texts(src).unwrap(), [expected], "{src}");
        }
    }

    #[test]
    fn splits_on_unescaped_commas_only() {
        assert_eq!(parse_texts("a,b,c").unwrap(), ["a", "b", "c"]);
        assert_eq!(parse_texts(r"a\,b,c").unwrap(), ["a,b", "c"]);
        assert_eq!(parse_texts("").unwrap(), [""]);
    }

    #[test]
    fn rejects_unknown_escape_and_trailing_backslash() {
        for src in [r"bad\x escape", r"trailing\"] {
            let err = parse_texts(src).unwrap_err();
            assert_eq!(err.code, "ICAL-TYPE-011", "{src}");
        }
    }

    #[test]
    fn escape_round_trips() {
        let cases = ["plain", "semi;colon", "com,ma", "line\nbreak", r"back\slash"];
        for case in cases {
            let escaped = escape_text(case);
            assert_eq!(parse_texts(&escaped).unwrap(), [case], "{case}");
        }
    }

    #[test]
    fn escape_normalizes_crlf_to_backslash_n() {
        assert_eq!(escape_text("a\r\nb"), r"a\nb");
        assert_eq!(escape_text("a\rb"), r"a\nb");
    }
}
