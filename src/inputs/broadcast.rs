use crate::error::DomainError;

/// A broadcastable one-dimensional input: a scalar (length 1) or a vector.
///
/// ```
/// use cev_lib::Values;
///
/// let strikes: Values = vec![90.0, 100.0, 110.0].into();
/// let spot: Values = 100.0_f64.into();
/// assert_eq!(strikes.len(), 3);
/// assert_eq!(spot.at(2), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Values(Vec<f64>);

impl Values {
    pub fn scalar(value: f64) -> Self {
        Self(vec![value])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_scalar(&self) -> bool {
        self.0.len() == 1
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Element `i` of the broadcast; a scalar repeats for every `i`.
    ///
    /// # Panics
    /// If `i` is out of range for a non-scalar. Callers obtain `i` from
    /// [`broadcast_len`], which guarantees it is in range.
    pub fn at(&self, i: usize) -> f64 {
        if self.is_scalar() {
            self.0[0]
        } else {
            self.0[i]
        }
    }
}

impl From<f64> for Values {
    fn from(value: f64) -> Self {
        Self::scalar(value)
    }
}

impl From<Vec<f64>> for Values {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for Values {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Values {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

/// Common length of a set of named inputs.
///
/// Every input must have length 1 or the same length `n`; the result is `n`, or
/// 1 when every input is a scalar.
pub fn broadcast_len(inputs: &[(&'static str, &Values)]) -> Result<usize, DomainError> {
    let mut len = 1;
    for &(name, values) in inputs {
        if values.is_empty() {
            return Err(DomainError::EmptyInput(name));
        }
        if values.is_scalar() {
            continue;
        }
        if len == 1 {
            len = values.len();
        } else if values.len() != len {
            return Err(DomainError::LengthMismatch {
                name,
                len: values.len(),
                expected: len,
            });
        }
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_broadcast_to_one() {
        let a = Values::scalar(1.0);
        let b = Values::from(2.0);
        assert_eq!(broadcast_len(&[("a", &a), ("b", &b)]), Ok(1));
    }

    #[test]
    fn test_vector_sets_length() {
        let strikes = Values::from([80.0, 90.0, 100.0]);
        let spot = Values::scalar(100.0);
        assert_eq!(broadcast_len(&[("spot", &spot), ("strike", &strikes)]), Ok(3));
        assert_eq!(spot.at(2), 100.0);
        assert_eq!(strikes.at(1), 90.0);
    }

    #[test]
    fn test_equal_vectors_broadcast_together() {
        let strikes = Values::from(vec![80.0, 90.0]);
        let sigmas = Values::from(&[0.2, 0.3][..]);
        assert_eq!(broadcast_len(&[("strike", &strikes), ("sigma", &sigmas)]), Ok(2));
    }

    #[test]
    fn test_mismatched_lengths_fail() {
        let strikes = Values::from(vec![80.0, 90.0, 100.0]);
        let sigmas = Values::from(vec![0.2, 0.3]);
        assert_eq!(
            broadcast_len(&[("strike", &strikes), ("sigma", &sigmas)]),
            Err(DomainError::LengthMismatch {
                name: "sigma",
                len: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_empty_input_fails() {
        let empty = Values::from(Vec::<f64>::new());
        assert_eq!(
            broadcast_len(&[("strike", &empty)]),
            Err(DomainError::EmptyInput("strike"))
        );
    }
}
