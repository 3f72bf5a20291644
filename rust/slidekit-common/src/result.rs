pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

/// Fails with `InvalidArgument { name, message: condition }` unless `predicate` holds.
///
/// Usually invoked through the [`verify_arg!`](crate::verify_arg!) macro, which fills in `name` and
/// `condition` from the source text.
#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(crate::error::Error::invalid_arg(name, condition))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn checked_half(n: u32) -> super::Result<u32> {
        verify_arg!(n, n % 2 == 0);
        Ok(n / 2)
    }

    #[test]
    fn test_verify_arg() {
        assert_eq!(checked_half(10).unwrap(), 5);
        let err = checked_half(3).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "n");
                assert_eq!(message, "n % 2 == 0");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
