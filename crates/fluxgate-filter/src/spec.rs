//! Filter spec dissection.
//!
//! A filter spec is a one-entry JSON mapping from a field name to an
//! operator string: `{"nested.ip": "+ip_cidr/10.0.0.0/8"}`. This module
//! splits the operator string into tokens and classifies argument tokens as
//! inline literals or `$`-anchored references to another field of the same
//! event. Everything past the symbol is operator-defined; validation happens
//! in the per-operator build functions.

use serde_json::Value;

use crate::error::{BuildError, Result};
use crate::path::normalize;

/// First byte marking an argument token as a field reference.
pub const REFERENCE_ANCHOR: char = '$';

/// A classified argument token.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<T> {
    /// Inline literal, fixed at build time.
    Literal(T),
    /// Canonical path of another field in the same event.
    Field(String),
}

/// Classify an argument token.
///
/// A leading `$` makes the token a reference; its remainder is normalised
/// into canonical pointer form. Anything else is a literal, kept verbatim.
pub fn classify(token: &str) -> Operand<String> {
    match token.strip_prefix(REFERENCE_ANCHOR) {
        Some(rest) => Operand::Field(normalize(rest)),
        None => Operand::Literal(token.to_string()),
    }
}

/// A dissected filter spec: canonical field, operator symbol, raw argument
/// tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub field: String,
    pub op: String,
    pub args: Vec<String>,
}

impl FilterSpec {
    /// Dissect the one-entry spec mapping.
    ///
    /// Splitting is on `/` with no escaping and no empty-token suppression,
    /// so `"+s_eq/"` carries one empty literal argument and a regex
    /// containing `/` cannot be written inline.
    pub fn parse(spec: &Value) -> Result<FilterSpec> {
        let map = spec
            .as_object()
            .ok_or_else(|| BuildError::shape("filter spec must be a JSON object"))?;
        if map.len() != 1 {
            return Err(BuildError::shape(format!(
                "filter spec must have exactly one entry, got {}",
                map.len()
            )));
        }
        let Some((name, value)) = map.iter().next() else {
            return Err(BuildError::shape("filter spec mapping is empty"));
        };
        let Some(raw) = value.as_str() else {
            return Err(BuildError::shape(format!(
                "operator spec for '{name}' must be a string"
            )));
        };
        let Some(body) = raw.strip_prefix('+') else {
            return Err(BuildError::shape(format!(
                "operator spec '{raw}' must begin with '+'"
            )));
        };

        let mut tokens = body.split('/').map(str::to_string);
        let Some(op) = tokens.next() else {
            return Err(BuildError::shape("operator spec has no symbol"));
        };

        Ok(FilterSpec {
            field: normalize(name),
            op,
            args: tokens.collect(),
        })
    }

    /// Total token count, operator symbol included — the quantity the
    /// arity table is expressed in.
    pub fn token_count(&self) -> usize {
        1 + self.args.len()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        #[test]
        fn token_count_matches_slash_count(body in "[a-z_]{1,8}(/[a-z0-9.$]{0,6}){0,4}") {
            let raw = format!("+{body}");
            let slashes = body.matches('/').count();
            let spec = FilterSpec::parse(&json!({"f": raw})).unwrap();
            prop_assert_eq!(spec.token_count(), slashes + 1);
        }
    }
}
