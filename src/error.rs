/* ************************************************************************ **
** This file is part of flat-linalg, and is licensed under EITHER the MIT   **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::element::Element;

/// A numeric failure reported by the kernels provider.
///
/// `position` is the 1-based `info` code returned by LAPACK.  When an
/// operation fails, the contents of every buffer it was allowed to mutate are
/// unspecified and must not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum LinalgError {
    #[error("LU factorization failed: U({position}, {position}) is exactly zero")]
    FactorizationFailed { position: usize },

    #[error("matrix inversion failed: U({position}, {position}) is exactly zero")]
    InversionFailed { position: usize },

    #[error("linear solve failed: the system is singular at position {position}")]
    SolveFailed { position: usize },
}

impl LinalgError {
    /// The 1-based position reported by the kernel.
    pub fn position(&self) -> usize {
        match *self {
            LinalgError::FactorizationFailed { position } |
            LinalgError::InversionFailed { position } |
            LinalgError::SolveFailed { position } => position,
        }
    }
}

pub type Result<T> = ::std::result::Result<T, LinalgError>;

/// Decode the `info` code returned by a LAPACK routine.
///
/// Positive codes become the error produced by `on_failure`.
///
/// # Panics
///
/// A negative code means this crate handed the kernel an illegal argument,
/// which is a bug rather than a property of the data, so it panics.
pub(crate) fn check_info<T: Element>(
    routine: &str,
    info: i32,
    on_failure: fn(usize) -> LinalgError,
) -> Result<()> {
    match info {
        0 => Ok(()),
        info if info < 0 => panic!("bad arg number {} to {}{}", -info, T::PREFIX, routine),
        info => {
            let err = on_failure(info as usize);
            debug!("{}{} reported info = {}: {}", T::PREFIX, routine, info, err);
            Err(err)
        },
    }
}

pub(crate) fn factorization_failed(position: usize) -> LinalgError
{ LinalgError::FactorizationFailed { position } }

pub(crate) fn inversion_failed(position: usize) -> LinalgError
{ LinalgError::InversionFailed { position } }

pub(crate) fn solve_failed(position: usize) -> LinalgError
{ LinalgError::SolveFailed { position } }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_info_is_structured() {
        let err = check_info::<f64>("getrf", 3, factorization_failed).unwrap_err();
        assert_eq!(err, LinalgError::FactorizationFailed { position: 3 });
        assert_eq!(err.position(), 3);

        let err = check_info::<f32>("gtsv", 1, solve_failed).unwrap_err();
        assert_eq!(err, LinalgError::SolveFailed { position: 1 });
    }

    #[test]
    fn zero_info_is_success() {
        assert!(check_info::<f64>("getri", 0, inversion_failed).is_ok());
    }

    #[test]
    #[should_panic(expected = "bad arg number 4 to dgesv")]
    fn negative_info_is_a_bug() {
        let _ = check_info::<f64>("gesv", -4, solve_failed);
    }

    #[test]
    fn display() {
        let err = LinalgError::InversionFailed { position: 2 };
        assert_eq!(err.to_string(), "matrix inversion failed: U(2, 2) is exactly zero");
    }

    #[cfg(feature = "serde-support")]
    #[test]
    fn serde_round_trip() {
        let err = LinalgError::SolveFailed { position: 5 };
        let json = ::serde_json::to_string(&err).unwrap();
        assert_eq!(::serde_json::from_str::<LinalgError>(&json).unwrap(), err);
    }
}
