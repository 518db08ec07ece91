//! Field path normalisation.
//!
//! User-facing specs name fields with dots (`user.name`); internally every
//! path is a `/`-delimited pointer with a leading slash (`/user/name`), the
//! form [`crate::event`] resolves against the document. Segments may use
//! RFC 6901 escapes (`~0` for `~`, `~1` for `/`); the normaliser passes them
//! through untouched.

/// Convert a user path into its canonical pointer form.
///
/// If the first byte is not `/`, a `/` is prepended; every `.` is then
/// replaced with `/`. Nothing else is transformed, so a path that is
/// already canonical comes back unchanged and the function is idempotent.
/// The empty path yields `/`.
pub fn normalize(path: &str) -> String {
    let mut canon = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        canon.push('/');
    }
    for c in path.chars() {
        canon.push(if c == '.' { '/' } else { c });
    }
    canon
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalize_is_idempotent(path in "[a-zA-Z0-9_./~]{0,40}") {
            let once = normalize(&path);
            let twice = normalize(&once);
            prop_assert_eq!(&once, &twice);
        }
    }

    proptest! {
        #[test]
        fn output_always_starts_with_slash(path in "[a-zA-Z0-9_./~]{0,40}") {
            prop_assert!(normalize(&path).starts_with('/'));
        }
    }

    proptest! {
        #[test]
        fn output_never_contains_a_dot(path in "[a-zA-Z0-9_./~]{0,40}") {
            prop_assert!(!normalize(&path).contains('.'));
        }
    }
}
