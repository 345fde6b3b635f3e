pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use folio_utils::Apply;
    /// fn greet(greeting: String, name: Option<&str>) -> String {
    ///     greeting.apply_map(name, |slf, name| format!("{slf}, {name}"))
    /// }
    /// assert_eq!(greet("Hello".into(), None), "Hello");
    /// assert_eq!(greet("Hello".into(), Some("Ada")), "Hello, Ada");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the guard")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_matches_with_guard() {
        let value: Result<u16, ()> = Ok(250);
        assert_matches!(value, Ok(code) if code / 100 == 2);
    }

    #[test]
    #[should_panic = "did not match pattern"]
    fn assert_matches_mismatch() {
        let value: Option<u8> = None;
        assert_matches!(value, Some(_));
    }

    #[test]
    fn apply_map_skips_none() {
        let out = 1.apply_map(None::<i32>, |slf, x| slf + x);
        assert_eq!(out, 1);
    }
}
