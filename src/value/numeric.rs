// SPDX-FileCopyrightText: 2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! INTEGER and FLOAT value types (RFC 5545 §3.3.8, §3.3.7).

use chumsky::prelude::*;

use crate::error::{ValueError, codes};
use crate::value::Extra;

/// ```txt
/// integer = (["+"] / "-") 1*DIGIT
/// ```
///
/// Range-checked to 64 bits.
pub(crate) fn integer<'src>() -> impl Parser<'src, &'src str, i64, Extra<'src>> {
    one_of("+-")
        .or_not()
        .then(select! { c @ '0'..='9' => c }.repeated().at_least(1))
        .to_slice()
        .try_map(|digits: &str, span| match lexical::parse_partial::<i64, _>(digits) {
            Ok((v, n)) if n == digits.len() => Ok(v),
            _ => Err(Rich::custom(span, "integer out of 64-bit range")),
        })
}

/// ```txt
/// float = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
///
/// The fractional digits may be empty, matching `-?\d+(\.\d*)?`.
pub(crate) fn float<'src>() -> impl Parser<'src, &'src str, f64, Extra<'src>> {
    let digits = select! { c @ '0'..='9' => c }.repeated();

    one_of("+-")
        .or_not()
        .then(digits.at_least(1))
        .then(just('.').then(digits).or_not())
        .to_slice()
        .try_map(|s: &str, span| {
            // A trailing '.' is tolerated by padding a zero for conversion.
            let padded;
            let digits = if s.ends_with('.') {
                padded = format!("{s}0");
                padded.as_str()
            } else {
                s
            };
            match lexical::parse_partial::<f64, _>(digits) {
                Ok((v, n)) if n == digits.len() => Ok(v),
                _ => Err(Rich::custom(span, "float out of range")),
            }
        })
}

/// Parse a comma-separated INTEGER list.
pub fn parse_integers(raw: &str) -> Result<Vec<i64>, ValueError> {
    integer()
        .separated_by(just(','))
        .at_least(1)
        .collect()
        .parse(raw)
        .into_result()
        .map_err(|errs| {
            let detail = errs
                .first()
                .map_or_else(|| "invalid integer".to_string(), ToString::to_string);
            ValueError::new(codes::TYPE_INTEGER, format!("{detail} in {raw:?}"))
        })
}

/// Parse a comma-separated FLOAT list.
pub fn parse_floats(raw: &str) -> Result<Vec<f64>, ValueError> {
    float()
        .separated_by(just(','))
        .at_least(1)
        .collect()
        .parse(raw)
        .into_result()
        .map_err(|errs| {
            let detail = errs
                .first()
                .map_or_else(|| "invalid float".to_string(), ToString::to_string);
            ValueError::new(codes::TYPE_FLOAT, format!("{detail} in {raw:?}"))
        })
}
