//! Error type shared by the buffer, the interpolation engine and the function algebra

/// Contract violations raised by the algebra.
///
/// Degenerate inputs (empty functions, empty query lists, zero-length
/// intervals) are not errors; they pass through unchanged.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlgebraError {
    /// Operand dimensions differ where equality is required
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Parameter grid length does not fit the sample buffer
    #[error("Grid length mismatch: expected {expected} knots, got {actual}")]
    GridLength { expected: usize, actual: usize },

    /// Flat data does not fill the requested buffer shape
    #[error("Buffer length mismatch: expected {expected} values, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// A monotone scalar function was required
    #[error("Operation requires a one-dimensional function, got dimension {dim}")]
    NotOneDimensional { dim: usize },
}

impl AlgebraError {
    /// Shorthand for a dimension check
    #[inline]
    pub(crate) fn check_dim(expected: usize, actual: usize) -> Result<()> {
        if expected != actual {
            return Err(Self::DimensionMismatch { expected, actual });
        }
        Ok(())
    }

    /// Get error category, `"invalid_argument"` for bad operand shapes and
    /// `"logic"` for violated dimensionality preconditions
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::DimensionMismatch { .. }
            | Self::GridLength { .. }
            | Self::BufferLength { .. } => "invalid_argument",
            Self::NotOneDimensional { .. } => "logic",
        }
    }
}

pub type Result<T> = core::result::Result<T, AlgebraError>;

#[cfg(test)]
mod test {
    use super::AlgebraError;

    #[test]
    fn test_error_categories() {
        let e = AlgebraError::DimensionMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(e.category(), "invalid_argument");
        assert_eq!(e.to_string(), "Dimension mismatch: expected 2, got 3");

        let e = AlgebraError::NotOneDimensional { dim: 2 };
        assert_eq!(e.category(), "logic");
    }

    #[test]
    fn test_check_dim() {
        assert!(AlgebraError::check_dim(3, 3).is_ok());
        assert_eq!(
            AlgebraError::check_dim(3, 1),
            Err(AlgebraError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        );
    }
}
