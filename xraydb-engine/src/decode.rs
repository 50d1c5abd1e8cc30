//! Decoding of array-valued text columns.
//!
//! The store writes numeric sequences as JSON arrays. Hand-edited stores
//! sometimes carry bare lists (`1.0 2.0 3.0` or `1.0, 2.0`), which are
//! accepted too, with or without surrounding brackets.

use crate::error::{Result, XrayDbError};

/// Decode one text column into an ordered sequence of finite floats.
pub fn decode_floats(text: &str, table: &'static str, element: &str) -> Result<Vec<f64>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(XrayDbError::malformed(table, element, "empty array column"));
    }

    let values = match serde_json::from_str::<Vec<f64>>(trimmed) {
        Ok(values) => values,
        Err(json_err) => parse_bare_list(trimmed).ok_or_else(|| {
            XrayDbError::malformed(table, element, format!("cannot decode array: {json_err}"))
        })?,
    };

    if values.is_empty() {
        return Err(XrayDbError::malformed(table, element, "empty array column"));
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(XrayDbError::malformed(
            table,
            element,
            format!("non-finite value at index {pos}"),
        ));
    }
    Ok(values)
}

fn parse_bare_list(text: &str) -> Option<Vec<f64>> {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    let values: Option<Vec<f64>> = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| w.parse::<f64>().ok())
        .collect();
    values.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_json_array() {
        let v = decode_floats("[1.0, 2.5, -3e2]", "test", "Fe").unwrap();
        assert_eq!(v, vec![1.0, 2.5, -300.0]);
    }

    #[test]
    fn test_decode_bare_lists() {
        assert_eq!(
            decode_floats("1 2  3", "test", "Fe").unwrap(),
            vec![1.0, 2.0, 3.0]
        );
        assert_eq!(
            decode_floats("1.5,2.5 , 3.5", "test", "Fe").unwrap(),
            vec![1.5, 2.5, 3.5]
        );
        assert_eq!(
            decode_floats("[4 5]", "test", "Fe").unwrap(),
            vec![4.0, 5.0]
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for bad in ["", "   ", "[1.0, abc]", "{\"a\": 1}", "[]", "[1.0, 2.0"] {
            assert!(
                matches!(
                    decode_floats(bad, "chantler", "Fe"),
                    Err(XrayDbError::MalformedCoefficients { table: "chantler", .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_non_finite() {
        assert!(decode_floats("1.0 NaN 2.0", "test", "Fe").is_err());
        assert!(decode_floats("1.0 inf", "test", "Fe").is_err());
    }
}
