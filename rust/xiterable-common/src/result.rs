pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_range {
    ($operation:expr, $expr:expr, $message:expr) => {{
        let result = $expr;
        $crate::result::verify_range(result, $operation, $message)?;
    }};
}

#[macro_export]
macro_rules! verify_type {
    ($operation:expr, $expr:expr, $message:expr) => {{
        let result = $expr;
        $crate::result::verify_type(result, $operation, $message)?;
    }};
}

#[inline]
pub fn verify_range(predicate: bool, operation: &str, message: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        range_error(operation, message)
    }
}

#[inline]
pub fn verify_type(predicate: bool, operation: &str, message: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        type_error(operation, message)
    }
}

#[cold]
pub fn range_error<T>(operation: &str, message: &str) -> Result<T> {
    log::debug!("{operation}: refused, {message}");
    Err(crate::error::ErrorKind::Range {
        operation: operation.to_string(),
        message: message.to_string(),
    }
    .into())
}

#[cold]
pub fn type_error<T>(operation: &str, message: &str) -> Result<T> {
    log::debug!("{operation}: rejected input, {message}");
    Err(crate::error::ErrorKind::Type {
        operation: operation.to_string(),
        message: message.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_half(n: i32) -> Result<i32> {
        verify_range!("half", n >= 0, "negative input");
        verify_type!("half", n % 2 == 0, "odd input");
        Ok(n / 2)
    }

    #[test]
    fn test_verify_macros() {
        assert_eq!(checked_half(8).unwrap(), 4);
        assert!(checked_half(-2).unwrap_err().is_range_error());
        assert!(checked_half(3).unwrap_err().is_type_error());
    }
}
