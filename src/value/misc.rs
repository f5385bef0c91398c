// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! BOOLEAN, BINARY, URI and CAL-ADDRESS value types (RFC 5545 §3.3.2,
//! §3.3.1, §3.3.13, §3.3.3).

use std::sync::LazyLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;

use crate::error::{ValueError, codes};
use crate::keyword::{KW_FALSE, KW_TRUE};

/// Parse a BOOLEAN value, case-insensitively.
pub fn parse_boolean(raw: &str) -> Result<bool, ValueError> {
    if raw.eq_ignore_ascii_case(KW_TRUE) {
        Ok(true)
    } else if raw.eq_ignore_ascii_case(KW_FALSE) {
        Ok(false)
    } else {
        Err(ValueError::new(
            codes::TYPE_BOOLEAN,
            format!("expected TRUE or FALSE, found {raw:?}"),
        ))
    }
}

/// Validate a BINARY value.
///
/// Strict mode checks the base64 alphabet and padding; lenient mode keeps the
/// bytes as-is (the caller records the failure as a warning).
pub fn parse_binary(raw: &str, strict: bool) -> Result<String, ValueError> {
    if strict && BASE64.decode(raw).is_err() {
        return Err(ValueError::new(
            codes::TYPE_BINARY,
            "value is not valid base64",
        ));
    }
    Ok(raw.to_string())
}

/// Decode a BINARY value into raw bytes.
///
/// # Errors
///
/// Fails with [`codes::TYPE_BINARY`] when the stored form is not base64.
pub fn decode_binary(raw: &str) -> Result<Vec<u8>, ValueError> {
    BASE64
        .decode(raw)
        .map_err(|e| ValueError::new(codes::TYPE_BINARY, e.to_string()))
}

static URI_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    // scheme ":" hier-part -- a surface check, not full RFC 3986 validation
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:\S+$").unwrap_or_else(|_| unreachable!())
});

/// Surface-check a URI value: a scheme, a colon, and no whitespace.
pub fn parse_uri(raw: &str) -> Result<String, ValueError> {
    if URI_SHAPE.is_match(raw) {
        Ok(raw.to_string())
    } else {
        Err(ValueError::new(
            codes::TYPE_URI,
            format!("{raw:?} is not a URI"),
        ))
    }
}

/// Parse a CAL-ADDRESS value: a URI, commonly `mailto:`.
pub fn parse_cal_address(raw: &str) -> Result<String, ValueError> {
    if URI_SHAPE.is_match(raw) {
        Ok(raw.to_string())
    } else {
        Err(ValueError::new(
            codes::TYPE_CAL_ADDRESS,
            format!("{raw:?} is not a calendar user address"),
        ))
    }
}
