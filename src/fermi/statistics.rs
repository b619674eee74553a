// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Fermi-Dirac occupation functions and the closed-form Fermi integral of a two-dimensional subband
//!
//! The population of a parabolic subband with minimum `E_sb` and density-of-states mass `m*` is
//!
//! ```text
//! N = ρ k_B T ln(1 + exp((E_F - E_sb) / k_B T)),     ρ = m* / (π ħ²)
//! ```
//!
//! and inverting for the Fermi energy gives `E_F = E_sb + k_B T ln(exp(N / ρ k_B T) - 1)`. Both
//! logarithms are evaluated through `ln_1p` and `exp_m1` so neither overflows nor cancels when the
//! reduced energy is large in magnitude or close to zero.

use super::FermiError;
use crate::constants::{BOLTZMANN, HBAR};
use nalgebra::RealField;

/// Weight of the exponential for a donor level with a spin degeneracy of two
const DONOR_DEGENERACY_WEIGHT: f64 = 0.5;

/// Returns `k_B T` in Joules, rejecting temperatures which are not strictly positive
pub(crate) fn thermal_energy<T: Copy + RealField>(temperature: T) -> Result<T, FermiError<T>> {
    if !(temperature > T::zero()) {
        return Err(FermiError::InvalidTemperature(temperature));
    }
    Ok(T::from_f64(BOLTZMANN).expect("Boltzmann constant must fit in T") * temperature)
}

/// The two-dimensional density of states `m* / (π ħ²)` in J^-1 m^-2
pub fn density_of_states<T: Copy + RealField>(mass: T) -> T {
    let hbar = T::from_f64(HBAR).expect("Reduced Planck constant must fit in T");
    mass / (T::pi() * hbar * hbar)
}

/// Probability that a state at `energy` is occupied for a Fermi energy `fermi_energy`
///
/// Saturates to exactly zero or one far from the Fermi energy rather than overflowing.
pub fn occupation_probability<T: Copy + RealField>(
    fermi_energy: T,
    energy: T,
    temperature: T,
) -> Result<T, FermiError<T>> {
    let reduced_energy = (energy - fermi_energy) / thermal_energy(temperature)?;
    Ok(weighted_logistic(reduced_energy, T::one()))
}

/// Probability that a donor level at `donor_energy` is occupied, `1 / (½ exp((E_d - E_F) / k_B T) + 1)`
pub fn ionised_occupation_probability<T: Copy + RealField>(
    fermi_energy: T,
    donor_energy: T,
    temperature: T,
) -> Result<T, FermiError<T>> {
    let reduced_energy = (donor_energy - fermi_energy) / thermal_energy(temperature)?;
    let weight = T::from_f64(DONOR_DEGENERACY_WEIGHT).expect("Degeneracy weight must fit in T");
    Ok(weighted_logistic(reduced_energy, weight))
}

/// The areal population of a subband with minimum `subband_minimum` and mass `mass` in m^-2
pub fn subband_population<T: Copy + RealField>(
    subband_minimum: T,
    fermi_energy: T,
    mass: T,
    temperature: T,
) -> Result<T, FermiError<T>> {
    let thermal_energy = thermal_energy(temperature)?;
    if !(mass > T::zero()) {
        return Err(FermiError::InvalidMass(mass));
    }
    Ok(areal_density(
        density_of_states(mass),
        thermal_energy,
        (fermi_energy - subband_minimum) / thermal_energy,
    ))
}

/// The quasi-Fermi energy of a single subband holding `population` carriers per m^2
///
/// This assumes the carriers can occupy any energy above the subband minimum. The population must be
/// strictly positive, as the Fermi energy diverges to minus infinity for an empty subband.
pub fn single_subband_fermi_energy<T: Copy + RealField>(
    subband_minimum: T,
    mass: T,
    population: T,
    temperature: T,
) -> Result<T, FermiError<T>> {
    let thermal_energy = thermal_energy(temperature)?;
    if !(mass > T::zero()) {
        return Err(FermiError::InvalidMass(mass));
    }
    if !(population > T::zero()) {
        return Err(FermiError::InvalidPopulation(population));
    }
    let filling = population / (density_of_states(mass) * thermal_energy);
    Ok(subband_minimum + thermal_energy * ln_exp_minus_one(filling))
}

/// Closed form of the two-dimensional Fermi integral `ρ k_B T ln(1 + e^y)`
pub(crate) fn areal_density<T: Copy + RealField>(
    density_of_states: T,
    thermal_energy: T,
    reduced_energy: T,
) -> T {
    density_of_states * thermal_energy * ln_one_plus_exp(reduced_energy)
}

/// Evaluates `1 / (w e^x + 1)` without forming `e^x` for positive `x`
fn weighted_logistic<T: Copy + RealField>(x: T, weight: T) -> T {
    if x > T::zero() {
        let decay = (-x).exp();
        decay / (decay + weight)
    } else {
        T::one() / (weight * x.exp() + T::one())
    }
}

/// Evaluates `ln(1 + e^y)`
fn ln_one_plus_exp<T: Copy + RealField>(y: T) -> T {
    if y > T::zero() {
        y + (-y).exp().ln_1p()
    } else {
        y.exp().ln_1p()
    }
}

/// Evaluates `ln(e^a - 1)` for positive `a`
fn ln_exp_minus_one<T: Copy + RealField>(a: T) -> T {
    if a > T::one() {
        a + (-(-a).exp()).ln_1p()
    } else {
        a.exp_m1().ln()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{ELECTRON_CHARGE, ELECTRON_MASS};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const GAAS_MASS: f64 = 0.067 * ELECTRON_MASS;

    #[test]
    fn occupation_is_one_half_at_the_fermi_energy() {
        for temperature in [0.1, 4.2, 77.0, 300.0, 1000.0] {
            let fermi_energy = 0.1 * ELECTRON_CHARGE;
            let occupation =
                occupation_probability(fermi_energy, fermi_energy, temperature).unwrap();
            assert_relative_eq!(occupation, 0.5, epsilon = f64::EPSILON);
        }
    }

    #[test]
    fn ionised_occupation_is_two_thirds_at_the_fermi_energy() {
        for temperature in [0.1, 4.2, 77.0, 300.0, 1000.0] {
            let occupation = ionised_occupation_probability(-1e-21, -1e-21, temperature).unwrap();
            assert_relative_eq!(occupation, 2.0 / 3.0, epsilon = f64::EPSILON);
        }
    }

    #[test]
    fn occupation_saturates_without_overflow() {
        // Reduced energies of order ±10^5, far beyond the range of `exp`
        let energy = 1.0 * ELECTRON_CHARGE;
        let high = occupation_probability(-energy, energy, 1.0).unwrap();
        let low = occupation_probability(energy, -energy, 1.0).unwrap();
        assert_eq!(high, 0.0);
        assert_eq!(low, 1.0);
        let ionised_high = ionised_occupation_probability(-energy, energy, 1.0).unwrap();
        let ionised_low = ionised_occupation_probability(energy, -energy, 1.0).unwrap();
        assert_eq!(ionised_high, 0.0);
        assert_eq!(ionised_low, 1.0);
    }

    #[test]
    fn population_is_finite_for_extreme_reduced_energies() {
        let deep = subband_population(0.0, -1.0 * ELECTRON_CHARGE, GAAS_MASS, 1.0).unwrap();
        assert!(deep >= 0.0);
        assert!(deep.is_finite());

        // Degenerate limit: the population is ρ (E_F - E_sb)
        let fermi_energy = 1.0 * ELECTRON_CHARGE;
        let degenerate = subband_population(0.0, fermi_energy, GAAS_MASS, 1.0).unwrap();
        assert_relative_eq!(
            degenerate,
            density_of_states(GAAS_MASS) * fermi_energy,
            max_relative = 1e-12
        );
    }

    #[test]
    fn population_at_the_subband_minimum_is_ln2_rho_kt() {
        let temperature = 300.0;
        let population = subband_population(0.0, 0.0, GAAS_MASS, temperature).unwrap();
        let expected = density_of_states(GAAS_MASS)
            * crate::constants::BOLTZMANN
            * temperature
            * std::f64::consts::LN_2;
        assert_relative_eq!(population, expected, max_relative = 1e-14);
    }

    #[test]
    fn temperature_dependent_functions_reject_non_positive_temperatures() {
        for temperature in [0.0, -1.0] {
            assert!(matches!(
                occupation_probability(0.0, 0.0, temperature),
                Err(FermiError::InvalidTemperature(_))
            ));
            assert!(matches!(
                ionised_occupation_probability(0.0, 0.0, temperature),
                Err(FermiError::InvalidTemperature(_))
            ));
            assert!(matches!(
                subband_population(0.0, 0.0, GAAS_MASS, temperature),
                Err(FermiError::InvalidTemperature(_))
            ));
            assert!(matches!(
                single_subband_fermi_energy(0.0, GAAS_MASS, 1e15, temperature),
                Err(FermiError::InvalidTemperature(_))
            ));
        }
    }

    #[test]
    fn single_subband_fermi_energy_rejects_empty_subbands() {
        assert!(matches!(
            single_subband_fermi_energy(0.0, GAAS_MASS, 0.0, 77.0),
            Err(FermiError::InvalidPopulation(_))
        ));
        assert!(matches!(
            single_subband_fermi_energy(0.0, 0.0, 1e15, 77.0),
            Err(FermiError::InvalidMass(_))
        ));
    }

    #[test]
    fn single_subband_fermi_energy_is_accurate_for_a_dilute_population() {
        // For N << ρ k_B T the closed form reduces to E_sb + k_B T ln(N / ρ k_B T)
        let temperature = 300.0;
        let thermal_energy = crate::constants::BOLTZMANN * temperature;
        let population = 1e-6 * density_of_states(GAAS_MASS) * thermal_energy;
        let fermi_energy =
            single_subband_fermi_energy(0.0, GAAS_MASS, population, temperature).unwrap();
        assert_relative_eq!(
            fermi_energy,
            thermal_energy * (1e-6f64).ln(),
            max_relative = 1e-6
        );
    }

    #[test]
    fn population_round_trips_through_the_single_subband_inverse() {
        let temperature = 77.0;
        let subband_minimum = 1.0 * ELECTRON_CHARGE;
        let thermal_energy = crate::constants::BOLTZMANN * temperature;
        for step in -50..=50 {
            let fermi_energy = subband_minimum + f64::from(step) * thermal_energy;
            let population =
                subband_population(subband_minimum, fermi_energy, GAAS_MASS, temperature)
                    .unwrap();
            let recovered =
                single_subband_fermi_energy(subband_minimum, GAAS_MASS, population, temperature)
                    .unwrap();
            assert_relative_eq!(recovered, fermi_energy, max_relative = 1e-6);
        }
    }

    proptest! {
        #[test]
        fn population_increases_with_fermi_energy(
            reduced_energy in -50f64..50f64,
            temperature in 1f64..1000f64,
            mass_ratio in 0.01f64..2f64,
        ) {
            let mass = mass_ratio * ELECTRON_MASS;
            let thermal_energy = crate::constants::BOLTZMANN * temperature;
            let fermi_energy = reduced_energy * thermal_energy;
            let step = 0.1 * thermal_energy;
            let lower = subband_population(0.0, fermi_energy, mass, temperature).unwrap();
            let upper = subband_population(0.0, fermi_energy + step, mass, temperature).unwrap();
            prop_assert!(upper > lower);
        }

        #[test]
        fn occupation_is_symmetric_about_the_fermi_energy(
            reduced_energy in -700f64..700f64,
            temperature in 1f64..1000f64,
        ) {
            let thermal_energy = crate::constants::BOLTZMANN * temperature;
            let offset = reduced_energy * thermal_energy;
            let above = occupation_probability(0.0, offset, temperature).unwrap();
            let below = occupation_probability(0.0, -offset, temperature).unwrap();
            prop_assert!((0.0..=1.0).contains(&above));
            prop_assert!((above + below - 1.0).abs() < 1e-12);
        }
    }
}
