//! # fluxgate-filter
//!
//! Compiled filter predicates for a streaming event pipeline.
//!
//! A declarative spec — a one-entry JSON mapping from a field path to a
//! symbolic operator string such as `{"nested.ip": "+ip_cidr/10.0.0.0/8"}` —
//! is compiled once at graph-build time into an immutable predicate over
//! events. The predicate extracts a typed value at the referenced path
//! (optionally comparing it against another field of the same event via a
//! `$`-anchored reference), applies the operator's comparison, emits exactly
//! one trace line, and returns a boolean.
//!
//! ## Two error regimes
//!
//! Building is strict: unknown operators, wrong arity, malformed spec
//! documents, uncompilable regexes, unparsable integers and CIDR components
//! all fail with a [`BuildError`]. Evaluation is lenient: a missing field,
//! a wrong-kinded value, or an unparseable IPv4 subject collapses to a clean
//! `false` with a failure trace — predicates never fail on the hot path, so
//! one malformed event cannot derail the surrounding decision tree.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use fluxgate_filter::{JsonEvent, Recorder, compile};
//!
//! let tracer = Arc::new(Recorder::default());
//! let filter = compile(&json!({"user.name": "+s_eq/root"}), tracer.clone()).unwrap();
//!
//! let event = json!({"user": {"name": "root"}});
//! assert!(filter.eval(&JsonEvent::from_value(&event)));
//!
//! let other = json!({"user": {"name": "nobody"}});
//! assert!(!filter.eval(&JsonEvent::from_value(&other)));
//!
//! assert_eq!(
//!     tracer.lines(),
//!     vec![
//!         r#"{"user.name":"+s_eq/root"} Condition Success"#,
//!         r#"{"user.name":"+s_eq/root"} Condition Failure"#,
//!     ],
//! );
//! ```
//!
//! ## Referencing another field
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use fluxgate_filter::{JsonEvent, LogSink, compile};
//!
//! let filter = compile(&json!({"a": "+i_ge/$b"}), Arc::new(LogSink)).unwrap();
//! let event = json!({"a": 5, "b": 5});
//! assert!(filter.eval(&JsonEvent::from_value(&event)));
//! ```

pub mod cidr;
pub mod compare;
mod compiler;
pub mod error;
pub mod event;
pub mod filter;
pub mod path;
pub mod registry;
pub mod spec;
pub mod trace;

// Re-export the most commonly used types and functions at crate root
pub use cidr::CidrRange;
pub use compare::CmpOp;
pub use error::{BuildError, Result};
pub use event::{EventRead, JsonEvent, Kind, Leaf};
pub use filter::{CompiledFilter, FilterKind};
pub use path::normalize;
pub use registry::{OpCode, compile, compile_all};
pub use spec::{FilterSpec, Operand, REFERENCE_ANCHOR, classify};
pub use trace::{LogSink, Recorder, TraceLabels, TraceSink, Tracer};
