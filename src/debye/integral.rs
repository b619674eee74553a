// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! The third order Debye function
//!
//! ```text
//! D₃(x) = 3 / x³ ∫₀ˣ t³ / (eᵗ - 1) dt
//! ```

use nalgebra::RealField;

/// Even Bernoulli numbers B₂ to B₂₂
const BERNOULLI_EVEN: [f64; 11] = [
    1.0 / 6.0,
    -1.0 / 30.0,
    1.0 / 42.0,
    -1.0 / 30.0,
    5.0 / 66.0,
    -691.0 / 2730.0,
    7.0 / 6.0,
    -3617.0 / 510.0,
    43867.0 / 798.0,
    -174611.0 / 330.0,
    854513.0 / 138.0,
];

/// Cap on the number of exponentials summed for the complement of the integral
const MAXIMUM_TAIL_TERMS: usize = 64;

/// A method of evaluating the third order Debye function
pub trait DebyeFunction<T> {
    /// Evaluate `D₃(x)` for `x >= 0`
    fn debye_3(&self, x: T) -> T;
}

/// Evaluates `D₃` by a Bernoulli series for small arguments and an exponential sum for large ones
///
/// Both branches agree to about 1e-14 relative at the switch `x = 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeriesExpansion;

impl<T: Copy + RealField> DebyeFunction<T> for SeriesExpansion {
    fn debye_3(&self, x: T) -> T {
        if x <= T::one() {
            bernoulli_series(x)
        } else {
            complement_of_tail(x)
        }
    }
}

/// `D₃(x) = 1 - 3x/8 + 3 Σ B₂ₖ x²ᵏ / ((2k + 3)(2k)!)`, convergent for `x < 2π`
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
fn bernoulli_series<T: Copy + RealField>(x: T) -> T {
    let x_squared = x * x;
    let mut power = T::one();
    let mut factorial = T::one();
    let mut sum = 1.0 - 3.0 * x / 8.0;
    for (k, &bernoulli) in (1_usize..).zip(BERNOULLI_EVEN.iter()) {
        power *= x_squared;
        factorial *= T::from_usize((2 * k - 1) * (2 * k)).unwrap();
        sum += 3.0 * T::from_f64(bernoulli).unwrap() * power
            / (T::from_usize(2 * k + 3).unwrap() * factorial);
    }
    sum
}

/// `D₃(x) = 3 / x³ (π⁴ / 15 - ∫ₓ^∞ t³ / (eᵗ - 1) dt)`, with the tail expanded in powers of `e^-x`
#[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
fn complement_of_tail<T: Copy + RealField>(x: T) -> T {
    let x_squared = x * x;
    let x_cubed = x_squared * x;
    let mut tail = T::zero();
    for k in 1..=MAXIMUM_TAIL_TERMS {
        let k = T::from_usize(k).unwrap();
        let decay = (-k * x).exp();
        // Once the exponential underflows the remaining terms vanish, and the polynomial may overflow
        if decay == T::zero() {
            break;
        }
        let term = decay
            * (x_cubed / k + 3.0 * x_squared / (k * k) + 6.0 * x / (k * k * k)
                + 6.0 / (k * k * k * k));
        tail += term;
        if term <= T::default_epsilon() * tail {
            break;
        }
    }
    3.0 / x_cubed * (T::pi().powi(4) / 15.0 - tail)
}
