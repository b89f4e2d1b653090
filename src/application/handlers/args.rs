//! Positional string arguments

use super::Function;
use crate::shared::{DomainError, DomainResult};

/// Borrow exactly `N` arguments, or fail naming what `function` expects.
pub(crate) fn expect_args<const N: usize>(
    function: Function,
    args: &[String],
) -> DomainResult<[&str; N]> {
    if args.len() != N {
        return Err(DomainError::InvalidArgument(format!(
            "{function} expects {N} argument(s) ({}), got {}",
            function.params().join(", "),
            args.len()
        )));
    }
    Ok(std::array::from_fn(|i| args[i].as_str()))
}
