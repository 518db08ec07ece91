//! Per-operator build functions.
//!
//! Every function here follows the same shape: the dissected spec arrives
//! with its arity already checked by the registry, tokens are validated and
//! pre-compiled (integer parse, regex compile, CIDR bounds), and the result
//! is the [`FilterKind`] the predicate will dispatch on at runtime. All
//! validation failures are [`BuildError::Value`] carrying the offending
//! token.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use regex::Regex;

use crate::cidr::CidrRange;
use crate::compare::CmpOp;
use crate::error::{BuildError, Result};
use crate::filter::FilterKind;
use crate::registry::OpCode;
use crate::spec::{FilterSpec, Operand, classify};

/// Build the filter kind for an arity-checked spec.
pub(crate) fn build(op: OpCode, spec: &FilterSpec) -> Result<FilterKind> {
    match op {
        OpCode::Exists => Ok(FilterKind::Exists { expect: true }),
        OpCode::NotExists => Ok(FilterKind::Exists { expect: false }),
        OpCode::StrCmp(cmp) => Ok(FilterKind::StrCmp {
            op: cmp,
            rhs: classify(&spec.args[0]),
        }),
        OpCode::StrEqN => build_str_eq_n(spec),
        OpCode::IntCmp(cmp) => build_int_cmp(cmp, spec),
        OpCode::RegexMatch => build_regex(op.symbol(), spec, false),
        OpCode::RegexNotMatch => build_regex(op.symbol(), spec, true),
        OpCode::IpCidr => build_ip_cidr(spec),
    }
}

// <field>: +s_eq_n/<n>/<literal|$ref>
fn build_str_eq_n(spec: &FilterSpec) -> Result<FilterKind> {
    let n_tok = &spec.args[0];
    let n: usize = n_tok.parse().map_err(|_| {
        BuildError::value(
            "s_eq_n",
            n_tok,
            "prefix length must be a non-negative integer",
        )
    })?;
    Ok(FilterKind::StrEqN {
        n,
        rhs: classify(&spec.args[1]),
    })
}

// <field>: +i_*/<integer|$ref>
fn build_int_cmp(cmp: CmpOp, spec: &FilterSpec) -> Result<FilterKind> {
    let rhs = match classify(&spec.args[0]) {
        Operand::Field(path) => Operand::Field(path),
        Operand::Literal(tok) => {
            let n: i64 = tok.parse().map_err(|_| {
                BuildError::value(
                    OpCode::IntCmp(cmp).symbol(),
                    &tok,
                    "expected a signed 64-bit integer",
                )
            })?;
            Operand::Literal(n)
        }
    };
    Ok(FilterKind::IntCmp { op: cmp, rhs })
}

// <field>: +r_match/<regex>  |  +r_not_match/<regex>
//
// The pattern token is always a literal; `$` is regex syntax here, not a
// reference anchor.
fn build_regex(sym: &'static str, spec: &FilterSpec, negate: bool) -> Result<FilterKind> {
    let pattern = &spec.args[0];
    let re = Regex::new(pattern).map_err(|e| BuildError::value(sym, pattern, e.to_string()))?;
    Ok(FilterKind::Regex { re, negate })
}

// <field>: +ip_cidr/<network>/<prefix-or-netmask>
fn build_ip_cidr(spec: &FilterSpec) -> Result<FilterKind> {
    const SYM: &str = "ip_cidr";
    let network_tok = &spec.args[0];
    let mask_tok = &spec.args[1];

    if network_tok.is_empty() {
        return Err(BuildError::value(SYM, network_tok, "network must not be empty"));
    }
    if mask_tok.is_empty() {
        return Err(BuildError::value(SYM, mask_tok, "mask must not be empty"));
    }

    let network: Ipv4Addr = network_tok.parse().map_err(|_| {
        BuildError::value(SYM, network_tok, "not a dotted-quad IPv4 address")
    })?;

    let net = match mask_tok.parse::<u8>() {
        Ok(prefix) => Ipv4Net::new(network, prefix)
            .map_err(|_| BuildError::value(SYM, mask_tok, "prefix length must be 0..=32"))?,
        Err(_) => {
            let mask: Ipv4Addr = mask_tok.parse().map_err(|_| {
                BuildError::value(
                    SYM,
                    mask_tok,
                    "neither a prefix length nor a dotted-quad netmask",
                )
            })?;
            Ipv4Net::with_netmask(network, mask)
                .map_err(|_| BuildError::value(SYM, mask_tok, "netmask is not contiguous"))?
        }
    };

    Ok(FilterKind::IpCidr(CidrRange::from_net(net)))
}
