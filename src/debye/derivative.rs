// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Forward finite differences with an error estimate
//!
//! The derivative is taken from the cubic through `x + h/4`, `x + h/2`, `x + 3h/4` and `x + h`, so
//! the function is never evaluated at `x` itself. This lets quantities which are only defined for
//! `x > 0`, like the internal energy, be differentiated right down to the edge of their domain.

use super::DebyeError;
use nalgebra::RealField;

const DEFAULT_STEP: f64 = 1.0;

/// A derivative estimate with its absolute error
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Derivative<T> {
    /// The estimated derivative
    pub value: T,
    /// Estimate of the combined truncation and rounding error
    pub absolute_error: T,
}

/// Settings for a forward finite difference
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiniteDifference<T> {
    step: T,
}

impl<T: Copy + RealField> Default for FiniteDifference<T> {
    fn default() -> Self {
        Self {
            step: T::from_f64(DEFAULT_STEP).expect("Step must fit in T"),
        }
    }
}

struct Estimate<T> {
    value: T,
    rounding: T,
    truncation: T,
}

impl<T: Copy + RealField> FiniteDifference<T> {
    /// A forward difference with initial step `step`
    pub fn new(step: T) -> Result<Self, DebyeError<T>> {
        if !(step > T::zero()) {
            return Err(DebyeError::InvalidParameter(format!(
                "finite difference step must be positive, found {}",
                step
            )));
        }
        Ok(Self { step })
    }

    /// The initial step
    pub fn step(&self) -> T {
        self.step
    }

    /// Differentiate `function` at `x`
    ///
    /// The estimate at the initial step is refined once, at the step which balances the estimated
    /// rounding and truncation errors. The refined value is only kept when it lowers the error and is
    /// consistent with the first estimate.
    pub fn differentiate<F, E>(&self, function: F, x: T) -> Result<Derivative<T>, E>
    where
        F: Fn(T) -> Result<T, E>,
    {
        let initial = four_point_estimate(&function, x, self.step)?;
        let mut derivative = Derivative {
            value: initial.value,
            absolute_error: initial.rounding + initial.truncation,
        };

        if initial.rounding < initial.truncation
            && initial.rounding > T::zero()
            && initial.truncation > T::zero()
        {
            let optimal_step = self.step * (initial.rounding / initial.truncation).sqrt();
            let refined = four_point_estimate(&function, x, optimal_step)?;
            let refined_error = refined.rounding + refined.truncation;
            let four = T::from_f64(4.0).expect("Literal must fit in T");
            if refined_error < derivative.absolute_error
                && (refined.value - initial.value).abs() < four * derivative.absolute_error
            {
                derivative = Derivative {
                    value: refined.value,
                    absolute_error: refined_error,
                };
            }
        }

        Ok(derivative)
    }
}

/// The four point forward rule, with the two point rule on the same nodes as its error estimate
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
fn four_point_estimate<T, F, E>(function: &F, x: T, step: T) -> Result<Estimate<T>, E>
where
    T: Copy + RealField,
    F: Fn(T) -> Result<T, E>,
{
    let f1 = function(x + step / 4.0)?;
    let f2 = function(x + step / 2.0)?;
    let f3 = function(x + 3.0 * step / 4.0)?;
    let f4 = function(x + step)?;

    let two_point = 2.0 * (f4 - f2);
    let four_point =
        22.0 / 3.0 * (f4 - f3) - 62.0 / 3.0 * (f3 - f2) + 52.0 / 3.0 * (f2 - f1);

    let epsilon = T::default_epsilon();
    // Rounding in the function values, then in forming the abscissae
    let value_rounding = 2.0 * 20.67 * (f1.abs() + f2.abs() + f3.abs() + f4.abs()) * epsilon;
    let abscissa_rounding =
        (two_point / step).abs().max((four_point / step).abs()) * (x / step).abs() * epsilon;

    Ok(Estimate {
        value: four_point / step,
        rounding: (value_rounding / step).abs() + abscissa_rounding,
        truncation: ((four_point - two_point) / step).abs(),
    })
}

#[cfg(test)]
mod test {
    use super::FiniteDifference;
    use crate::debye::DebyeError;
    use approx::assert_relative_eq;
    use rand::Rng;

    type Evaluation = Result<f64, DebyeError<f64>>;

    #[test]
    fn cubic_derivative_is_within_the_error_estimate() {
        let mut rng = rand::thread_rng();
        let coefficients: [f64; 4] = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];
        let cubic = |x: f64| -> Evaluation {
            Ok(coefficients[0]
                + coefficients[1] * x
                + coefficients[2] * x * x
                + coefficients[3] * x * x * x)
        };
        let x: f64 = rng.gen_range(0.5..2.0);
        let exact = coefficients[1] + 2.0 * coefficients[2] * x + 3.0 * coefficients[3] * x * x;

        let derivative = FiniteDifference::default()
            .differentiate(cubic, x)
            .unwrap();
        assert_relative_eq!(derivative.value, exact, max_relative = 1e-6);
        assert!((derivative.value - exact).abs() <= derivative.absolute_error);
    }

    #[test]
    fn exponential_derivative_is_within_the_error_estimate() {
        let derivative = FiniteDifference::new(0.1)
            .unwrap()
            .differentiate(|x: f64| -> Evaluation { Ok(x.exp()) }, 1.0)
            .unwrap();
        let exact = 1f64.exp();
        assert_relative_eq!(derivative.value, exact, max_relative = 1e-6);
        assert!((derivative.value - exact).abs() <= derivative.absolute_error);
    }

    #[test]
    fn function_is_never_evaluated_at_the_base_point() {
        let derivative = FiniteDifference::default()
            .differentiate(
                |x: f64| -> Evaluation {
                    if x <= 0.0 {
                        Err(DebyeError::InvalidTemperature(x))
                    } else {
                        Ok(x * x)
                    }
                },
                0.0,
            )
            .unwrap();
        assert_relative_eq!(derivative.value, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn errors_from_the_function_are_propagated() {
        let result = FiniteDifference::default()
            .differentiate(|x: f64| -> Evaluation { Err(DebyeError::InvalidTemperature(x)) }, 1.0);
        assert!(matches!(result, Err(DebyeError::InvalidTemperature(_))));
    }

    #[test]
    fn non_positive_step_is_rejected() {
        assert!(FiniteDifference::new(0f64).is_err());
        assert!(FiniteDifference::new(-1f64).is_err());
    }
}
