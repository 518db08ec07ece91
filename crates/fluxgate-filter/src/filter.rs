//! Compiled filter predicates and their runtime evaluation.
//!
//! A [`CompiledFilter`] is produced once at build time and is immutable
//! thereafter: it captures the canonical target path, the pre-compiled
//! argument state (regex automaton, CIDR bounds, integer or string literal,
//! or a reference path), both trace labels, and the tracer handle.
//!
//! Evaluation is lenient: every failure to produce a typed value from the
//! event — missing path, wrong kind, unparseable IPv4 subject — collapses
//! to `false` with a failure trace. The predicate never fails and holds no
//! mutable state, so one compiled filter may evaluate events on any number
//! of threads concurrently.

use std::fmt;

use regex::Regex;

use crate::cidr::{self, CidrRange};
use crate::compare::{CmpOp, prefix_eq};
use crate::event::EventRead;
use crate::spec::Operand;
use crate::trace::{TraceLabels, Tracer};

/// The pre-compiled comparison a filter performs.
///
/// Comparison variants hold a literal argument or a reference path, never
/// both; the existence family holds neither.
#[derive(Debug, Clone)]
pub enum FilterKind {
    /// Field presence. `expect` is false for the negated form.
    Exists { expect: bool },

    /// Bytewise string comparison against a literal or referenced string.
    StrCmp { op: CmpOp, rhs: Operand<String> },

    /// Byte equality of the first `n` overlapping bytes.
    StrEqN { n: usize, rhs: Operand<String> },

    /// Signed 64-bit integer comparison.
    IntCmp { op: CmpOp, rhs: Operand<i64> },

    /// Partial regex match; `negate` flips a completed match, never a
    /// resolution failure.
    Regex { re: Regex, negate: bool },

    /// Dotted-quad subject inside pre-computed CIDR bounds.
    IpCidr(CidrRange),
}

/// An immutable, cloneable predicate over events.
#[derive(Clone)]
pub struct CompiledFilter {
    field: String,
    op: &'static str,
    kind: FilterKind,
    labels: TraceLabels,
    tracer: Tracer,
}

impl CompiledFilter {
    pub(crate) fn new(
        field: String,
        op: &'static str,
        kind: FilterKind,
        labels: TraceLabels,
        tracer: Tracer,
    ) -> Self {
        CompiledFilter {
            field,
            op,
            kind,
            labels,
            tracer,
        }
    }

    /// Canonical path of the field this filter inspects.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The operator symbol this filter was built from.
    pub fn op(&self) -> &'static str {
        self.op
    }

    /// Evaluate the predicate against an event.
    ///
    /// Emits exactly one trace line: the success label iff the result is
    /// true, the failure label otherwise.
    pub fn eval(&self, event: &dyn EventRead) -> bool {
        let matched = self.matches(event);
        self.tracer.emit(if matched {
            &self.labels.success
        } else {
            &self.labels.failure
        });
        matched
    }

    fn matches(&self, event: &dyn EventRead) -> bool {
        match &self.kind {
            FilterKind::Exists { expect } => event.has(&self.field) == *expect,

            FilterKind::StrCmp { op, rhs } => {
                let Some(lhs) = str_at(event, &self.field) else {
                    return false;
                };
                let rhs = match rhs {
                    Operand::Literal(v) => v.as_str(),
                    Operand::Field(path) => {
                        let Some(v) = str_at(event, path) else {
                            return false;
                        };
                        v
                    }
                };
                op.matches(lhs.cmp(rhs))
            }

            FilterKind::StrEqN { n, rhs } => {
                let Some(lhs) = str_at(event, &self.field) else {
                    return false;
                };
                let rhs = match rhs {
                    Operand::Literal(v) => v.as_str(),
                    Operand::Field(path) => {
                        let Some(v) = str_at(event, path) else {
                            return false;
                        };
                        v
                    }
                };
                prefix_eq(lhs, rhs, *n)
            }

            FilterKind::IntCmp { op, rhs } => {
                let Some(lhs) = int_at(event, &self.field) else {
                    return false;
                };
                let rhs = match rhs {
                    Operand::Literal(v) => *v,
                    Operand::Field(path) => {
                        let Some(v) = int_at(event, path) else {
                            return false;
                        };
                        v
                    }
                };
                op.matches(lhs.cmp(&rhs))
            }

            FilterKind::Regex { re, negate } => match str_at(event, &self.field) {
                Some(subject) => re.is_match(subject) != *negate,
                // A missing or non-string field fails both polarities; the
                // negated form is not a proxy for absence.
                None => false,
            },

            FilterKind::IpCidr(range) => str_at(event, &self.field)
                .and_then(cidr::parse_ipv4)
                .is_some_and(|ip| range.contains(ip)),
        }
    }
}

fn str_at<'e>(event: &'e dyn EventRead, path: &str) -> Option<&'e str> {
    event.lookup(path).and_then(|leaf| leaf.as_str())
}

fn int_at(event: &dyn EventRead, path: &str) -> Option<i64> {
    event.lookup(path).and_then(|leaf| leaf.as_int())
}

impl fmt::Debug for CompiledFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledFilter")
            .field("field", &self.field)
            .field("op", &self.op)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CompiledFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: +{}", self.field, self.op)
    }
}
