//! Typed comparators shared by the string and integer filter families.
//!
//! The comparator is a tagged variant applied to a [`std::cmp::Ordering`],
//! so string and integer filters dispatch through the same six-way match.
//! String order is bytewise lexicographic (the natural `Ord` of `str`); no
//! locale or Unicode normalisation is applied.

use std::cmp::Ordering;

/// The six ordering comparators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Whether the given ordering of `lhs` relative to `rhs` satisfies the
    /// comparator.
    pub fn matches(self, ord: Ordering) -> bool {
        match self {
            CmpOp::Eq => ord.is_eq(),
            CmpOp::Ne => ord.is_ne(),
            CmpOp::Lt => ord.is_lt(),
            CmpOp::Le => ord.is_le(),
            CmpOp::Gt => ord.is_gt(),
            CmpOp::Ge => ord.is_ge(),
        }
    }
}

/// Byte equality of the first `min(n, len(a), len(b))` bytes of each string.
///
/// When either string is shorter than `n` only the overlapping prefix is
/// compared; short strings never fail. `n == 0` is always true.
pub fn prefix_eq(a: &str, b: &str, n: usize) -> bool {
    let k = n.min(a.len()).min(b.len());
    a.as_bytes()[..k] == b.as_bytes()[..k]
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prefix_eq_is_symmetric(a in "[a-z]{0,10}", b in "[a-z]{0,10}", n in 0usize..16) {
            prop_assert_eq!(prefix_eq(&a, &b, n), prefix_eq(&b, &a, n));
        }
    }

    proptest! {
        #[test]
        fn prefix_eq_reflexive(a in "[a-z]{0,10}", n in 0usize..16) {
            prop_assert!(prefix_eq(&a, &a, n));
        }
    }

    proptest! {
        #[test]
        fn prefix_eq_agrees_with_equality_when_n_covers_both(
            a in "[a-z]{1,8}",
            b in "[a-z]{1,8}",
        ) {
            let n = a.len().max(b.len());
            // With n covering both strings, prefix equality of the overlap
            // holds iff the shorter is a prefix of the longer.
            let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
            prop_assert_eq!(prefix_eq(&a, &b, n), long.starts_with(short.as_str()));
        }
    }
}
