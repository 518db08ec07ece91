//! Operator registry and the build-time entry points.
//!
//! [`OpCode::from_symbol`] is the static symbol table; [`compile`] is the
//! one-shot dispatcher: dissect the spec, resolve the symbol, check arity,
//! hand off to the operator's build function. Dispatch happens once per
//! spec at graph-build time and is never on the event hot path.

use std::sync::Arc;

use serde_json::Value;

use crate::compare::CmpOp;
use crate::compiler;
use crate::error::{BuildError, Result};
use crate::filter::CompiledFilter;
use crate::spec::FilterSpec;
use crate::trace::{TraceLabels, Tracer};

/// Registered filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    Exists,
    NotExists,
    StrCmp(CmpOp),
    StrEqN,
    IntCmp(CmpOp),
    RegexMatch,
    RegexNotMatch,
    IpCidr,
}

impl OpCode {
    /// Resolve an operator symbol (the first token, without the `+`).
    pub fn from_symbol(sym: &str) -> Option<OpCode> {
        Some(match sym {
            "exists" => OpCode::Exists,
            "not_exists" => OpCode::NotExists,
            "s_eq" => OpCode::StrCmp(CmpOp::Eq),
            "s_ne" => OpCode::StrCmp(CmpOp::Ne),
            "s_lt" => OpCode::StrCmp(CmpOp::Lt),
            "s_le" => OpCode::StrCmp(CmpOp::Le),
            "s_gt" => OpCode::StrCmp(CmpOp::Gt),
            "s_ge" => OpCode::StrCmp(CmpOp::Ge),
            "s_eq_n" => OpCode::StrEqN,
            "i_eq" => OpCode::IntCmp(CmpOp::Eq),
            "i_ne" => OpCode::IntCmp(CmpOp::Ne),
            "i_lt" => OpCode::IntCmp(CmpOp::Lt),
            "i_le" => OpCode::IntCmp(CmpOp::Le),
            "i_gt" => OpCode::IntCmp(CmpOp::Gt),
            "i_ge" => OpCode::IntCmp(CmpOp::Ge),
            "r_match" => OpCode::RegexMatch,
            "r_not_match" => OpCode::RegexNotMatch,
            "ip_cidr" => OpCode::IpCidr,
            _ => return None,
        })
    }

    /// The canonical symbol for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            OpCode::Exists => "exists",
            OpCode::NotExists => "not_exists",
            OpCode::StrCmp(CmpOp::Eq) => "s_eq",
            OpCode::StrCmp(CmpOp::Ne) => "s_ne",
            OpCode::StrCmp(CmpOp::Lt) => "s_lt",
            OpCode::StrCmp(CmpOp::Le) => "s_le",
            OpCode::StrCmp(CmpOp::Gt) => "s_gt",
            OpCode::StrCmp(CmpOp::Ge) => "s_ge",
            OpCode::StrEqN => "s_eq_n",
            OpCode::IntCmp(CmpOp::Eq) => "i_eq",
            OpCode::IntCmp(CmpOp::Ne) => "i_ne",
            OpCode::IntCmp(CmpOp::Lt) => "i_lt",
            OpCode::IntCmp(CmpOp::Le) => "i_le",
            OpCode::IntCmp(CmpOp::Gt) => "i_gt",
            OpCode::IntCmp(CmpOp::Ge) => "i_ge",
            OpCode::RegexMatch => "r_match",
            OpCode::RegexNotMatch => "r_not_match",
            OpCode::IpCidr => "ip_cidr",
        }
    }

    /// Declared token count, operator symbol included.
    pub fn arity(self) -> usize {
        match self {
            OpCode::Exists | OpCode::NotExists => 1,
            OpCode::StrCmp(_) | OpCode::IntCmp(_) => 2,
            OpCode::RegexMatch | OpCode::RegexNotMatch => 2,
            OpCode::StrEqN | OpCode::IpCidr => 3,
        }
    }

    /// Every registered operator, in symbol-table order.
    pub fn all() -> &'static [OpCode] {
        const ALL: &[OpCode] = &[
            OpCode::Exists,
            OpCode::NotExists,
            OpCode::StrCmp(CmpOp::Eq),
            OpCode::StrCmp(CmpOp::Ne),
            OpCode::StrCmp(CmpOp::Lt),
            OpCode::StrCmp(CmpOp::Le),
            OpCode::StrCmp(CmpOp::Gt),
            OpCode::StrCmp(CmpOp::Ge),
            OpCode::StrEqN,
            OpCode::IntCmp(CmpOp::Eq),
            OpCode::IntCmp(CmpOp::Ne),
            OpCode::IntCmp(CmpOp::Lt),
            OpCode::IntCmp(CmpOp::Le),
            OpCode::IntCmp(CmpOp::Gt),
            OpCode::IntCmp(CmpOp::Ge),
            OpCode::RegexMatch,
            OpCode::RegexNotMatch,
            OpCode::IpCidr,
        ];
        ALL
    }
}

/// Compile a one-entry filter spec into a predicate.
pub fn compile(spec: &Value, tracer: Tracer) -> Result<CompiledFilter> {
    let parsed = FilterSpec::parse(spec)?;
    let Some(op) = OpCode::from_symbol(&parsed.op) else {
        return Err(BuildError::UnknownOperator(parsed.op.clone()));
    };

    let expected = op.arity();
    let got = parsed.token_count();
    if got != expected {
        return Err(BuildError::Arity {
            op: op.symbol(),
            expected,
            got,
        });
    }

    let kind = compiler::build(op, &parsed)?;
    Ok(CompiledFilter::new(
        parsed.field,
        op.symbol(),
        kind,
        TraceLabels::for_spec(spec),
        tracer,
    ))
}

/// Compile a batch of specs against one shared tracer, failing on the first
/// malformed spec. The shape the outer loader consumes.
pub fn compile_all(specs: &[Value], tracer: &Tracer) -> Result<Vec<CompiledFilter>> {
    specs
        .iter()
        .map(|spec| compile(spec, Arc::clone(tracer)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn noop() -> Tracer {
        Arc::new(|_: &str| {})
    }

    #[test]
    fn every_symbol_round_trips() {
        for op in OpCode::all() {
            assert_eq!(OpCode::from_symbol(op.symbol()), Some(*op));
        }
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = compile(&json!({"a": "+bogus/x"}), noop()).unwrap_err();
        assert!(
            matches!(&err, BuildError::UnknownOperator(sym) if sym == "bogus"),
            "got: {err}"
        );
    }

    #[test]
    fn empty_symbol_is_unknown() {
        let err = compile(&json!({"a": "+"}), noop()).unwrap_err();
        assert!(matches!(err, BuildError::UnknownOperator(_)), "got: {err}");
    }

    /// Valid argument tokens per operator, used to pad specs to a chosen
    /// token count.
    fn padding(op: OpCode) -> &'static str {
        match op {
            OpCode::IntCmp(_) => "7",
            OpCode::StrEqN => "3",
            OpCode::IpCidr => "8",
            _ => "tok",
        }
    }

    #[test]
    fn wrong_arity_fails_for_every_operator() {
        for op in OpCode::all() {
            for count in 1..=4usize {
                if count == op.arity() {
                    continue;
                }
                let mut raw = format!("+{}", op.symbol());
                for _ in 1..count {
                    raw.push('/');
                    raw.push_str(padding(*op));
                }
                let err = compile(&json!({"f": raw}), noop()).unwrap_err();
                assert!(
                    matches!(&err, BuildError::Arity { op: sym, expected, got }
                        if *sym == op.symbol() && *expected == op.arity() && *got == count),
                    "{raw}: got {err}"
                );
            }
        }
    }

    #[test]
    fn correct_arity_with_valid_tokens_compiles_for_every_operator() {
        let specs = [
            json!({"f": "+exists"}),
            json!({"f": "+not_exists"}),
            json!({"f": "+s_eq/v"}),
            json!({"f": "+s_ne/v"}),
            json!({"f": "+s_lt/v"}),
            json!({"f": "+s_le/v"}),
            json!({"f": "+s_gt/v"}),
            json!({"f": "+s_ge/v"}),
            json!({"f": "+s_eq_n/2/vv"}),
            json!({"f": "+i_eq/1"}),
            json!({"f": "+i_ne/1"}),
            json!({"f": "+i_lt/1"}),
            json!({"f": "+i_le/1"}),
            json!({"f": "+i_gt/1"}),
            json!({"f": "+i_ge/1"}),
            json!({"f": "+r_match/v.*"}),
            json!({"f": "+r_not_match/v.*"}),
            json!({"f": "+ip_cidr/10.0.0.0/8"}),
        ];
        assert_eq!(specs.len(), OpCode::all().len());
        for spec in &specs {
            compile(spec, noop()).unwrap_or_else(|e| panic!("{spec}: {e}"));
        }
    }

    #[test]
    fn compile_all_shares_the_tracer_and_fails_fast() {
        let tracer = noop();
        let ok = compile_all(
            &[json!({"a": "+exists"}), json!({"b": "+i_gt/0"})],
            &tracer,
        )
        .unwrap();
        assert_eq!(ok.len(), 2);

        let err = compile_all(
            &[json!({"a": "+exists"}), json!({"b": "+nope"})],
            &tracer,
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::UnknownOperator(_)));
    }

    #[test]
    fn compiled_field_is_canonical() {
        let filter = compile(&json!({"a.b.c": "+exists"}), noop()).unwrap();
        assert_eq!(filter.field(), "/a/b/c");
    }
}
