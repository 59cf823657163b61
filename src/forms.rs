// SPDX-License-Identifier: MIT

//! Ingress normalization for loosely-typed request bodies.
//!
//! The web client sends optional fields inconsistently: absent, `null`,
//! empty string, a number, or a numeric string. These deserializers
//! canonicalize all of those into one internal form at the boundary.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Optional free-text field: `""`, whitespace, and `null` become `None`;
/// numbers are rendered as text.
pub fn flex_opt_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(de)?;
    Ok(match value {
        None | Some(Loose::Null) | Some(Loose::Bool(_)) => None,
        Some(Loose::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(Loose::Int(n)) => Some(n.to_string()),
        Some(Loose::Float(f)) => Some(f.to_string()),
    })
}

/// Optional integer field: accepts a number or a numeric string; empty
/// string and `null` become `None`. Non-numeric text is a deser error.
pub fn flex_opt_u32<'de, D>(de: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value = Option::<Loose>::deserialize(de)?;
    match value {
        None | Some(Loose::Null) => Ok(None),
        Some(Loose::Int(n)) => u32::try_from(n)
            .map(Some)
            .map_err(|_| D::Error::custom("expected a non-negative integer")),
        Some(Loose::Float(f)) if f >= 0.0 && f.fract() == 0.0 => Ok(Some(f as u32)),
        Some(Loose::Float(_)) => Err(D::Error::custom("expected a non-negative integer")),
        Some(Loose::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|_| D::Error::custom("expected a non-negative integer"))
            }
        }
        Some(Loose::Bool(_)) => Err(D::Error::custom("expected a number")),
    }
}

/// Optional float field with the same empty-vs-absent tolerance.
pub fn flex_opt_f64<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value = Option::<Loose>::deserialize(de)?;
    match value {
        None | Some(Loose::Null) => Ok(None),
        Some(Loose::Int(n)) => Ok(Some(n as f64)),
        Some(Loose::Float(f)) => Ok(Some(f)),
        Some(Loose::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| D::Error::custom("expected a number"))
            }
        }
        Some(Loose::Bool(_)) => Err(D::Error::custom("expected a number")),
    }
}
