//! Branching variable selection.

use std::fmt;

use crate::model::FracVar;

/// Policy for choosing the variable to branch on.
///
/// Implementations are pure: they receive the relaxation assignment and its
/// fractional variables, and return one element of `fractional` without
/// mutating any shared state. The engine turns the choice into the
/// floor/ceiling split itself, so any policy preserves correctness.
pub trait VariableSelection: fmt::Debug {
    /// Pick the variable to branch on. `fractional` is non-empty and sorted
    /// by variable index; the returned entry must come from it.
    fn pick(&self, x: &[f64], fractional: &[FracVar]) -> FracVar;
}

/// Branch on the lowest-index fractional variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstFractional;

impl VariableSelection for FirstFractional {
    fn pick(&self, _x: &[f64], fractional: &[FracVar]) -> FracVar {
        fractional[0]
    }
}

/// Branch on the variable whose value is closest to the midpoint between
/// integers. Ties go to the lowest index.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostFractional;

impl VariableSelection for MostFractional {
    fn pick(&self, _x: &[f64], fractional: &[FracVar]) -> FracVar {
        *fractional
            .iter()
            .max_by(|a, b| {
                a.fractionality
                    .partial_cmp(&b.fractionality)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("fractional set is non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(var: usize, value: f64) -> FracVar {
        let f = (value - value.round()).abs();
        FracVar {
            var,
            value,
            fractionality: f,
        }
    }

    #[test]
    fn test_first_fractional() {
        let fractional = vec![frac(1, 2.1), frac(3, 0.5)];
        let pick = FirstFractional.pick(&[0.0, 2.1, 0.0, 0.5], &fractional);
        assert_eq!(pick.var, 1);
    }

    #[test]
    fn test_most_fractional() {
        let fractional = vec![frac(1, 2.1), frac(3, 0.5)];
        let pick = MostFractional.pick(&[0.0, 2.1, 0.0, 0.5], &fractional);
        assert_eq!(pick.var, 3);
    }

    #[test]
    fn test_most_fractional_tie_takes_first() {
        let fractional = vec![frac(0, 0.3), frac(2, 1.7)];
        let pick = MostFractional.pick(&[0.3, 0.0, 1.7], &fractional);
        assert_eq!(pick.var, 0);
    }
}
