// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Debye
//!
//! The Debye model of the lattice heat capacity.
//!
//! A [`DebyeModel`] is built once per material from its Debye temperature, molar mass and number of
//! atoms per formula unit, and is then queried at as many temperatures as needed. Energies and heat
//! capacities are normalised by the molar mass, so they are returned in J kg^-1 and J kg^-1 K^-1.
//!
//! The exact heat capacity is found by differentiating the internal energy numerically. Two closed
//! forms are also provided: the `T³` law which holds as `T → 0` and the Dulong-Petit limit which
//! holds for `T ≫ T_D`. [`DebyeModel::specific_heat_approx`] switches between them at the
//! temperature where they meet, and overestimates the heat capacity around that crossover.

mod derivative;
mod integral;

pub use derivative::{Derivative, FiniteDifference};
pub use integral::{DebyeFunction, SeriesExpansion};

use crate::constants::{AVOGADRO, BOLTZMANN};
use miette::Diagnostic;
use nalgebra::RealField;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised by the Debye model
pub enum DebyeError<T: RealField> {
    /// The internal energy or heat capacity was requested at a non-positive temperature
    #[error("cannot evaluate the lattice energy at T = {0} K")]
    #[diagnostic(code(debye::invalid_temperature))]
    InvalidTemperature(T),
    /// A model parameter was out of range
    #[error("{0}")]
    #[diagnostic(code(debye::invalid_parameter))]
    InvalidParameter(String),
}

/// Debye model for a single material
#[derive(Clone, Copy, Debug)]
pub struct DebyeModel<T, F = SeriesExpansion> {
    /// Debye temperature in K
    debye_temperature: T,
    /// Molar mass in kg / mol
    molar_mass: T,
    atoms_per_formula_unit: usize,
    finite_difference: FiniteDifference<T>,
    debye_function: F,
}

impl<T: Copy + RealField> DebyeModel<T> {
    /// Creates a model, evaluating `D₃` with the default [`SeriesExpansion`]
    pub fn new(
        debye_temperature: T,
        molar_mass: T,
        atoms_per_formula_unit: usize,
    ) -> Result<Self, DebyeError<T>> {
        if !(debye_temperature > T::zero()) {
            return Err(DebyeError::InvalidParameter(format!(
                "Debye temperature must be positive, found {} K",
                debye_temperature
            )));
        }
        if !(molar_mass > T::zero()) {
            return Err(DebyeError::InvalidParameter(format!(
                "molar mass must be positive, found {} kg/mol",
                molar_mass
            )));
        }
        if atoms_per_formula_unit == 0 {
            return Err(DebyeError::InvalidParameter(
                "a formula unit must contain at least one atom".into(),
            ));
        }
        Ok(Self {
            debye_temperature,
            molar_mass,
            atoms_per_formula_unit,
            finite_difference: FiniteDifference::default(),
            debye_function: SeriesExpansion,
        })
    }
}

impl<T: Copy + RealField, F: DebyeFunction<T>> DebyeModel<T, F> {
    /// Replace the finite difference used for the heat capacity
    pub fn with_finite_difference(self, finite_difference: FiniteDifference<T>) -> Self {
        Self {
            finite_difference,
            ..self
        }
    }

    /// Replace the evaluator of the Debye function
    pub fn with_debye_function<G: DebyeFunction<T>>(self, debye_function: G) -> DebyeModel<T, G> {
        DebyeModel {
            debye_temperature: self.debye_temperature,
            molar_mass: self.molar_mass,
            atoms_per_formula_unit: self.atoms_per_formula_unit,
            finite_difference: self.finite_difference,
            debye_function,
        }
    }

    /// The Debye temperature in K
    pub fn debye_temperature(&self) -> T {
        self.debye_temperature
    }

    /// The molar mass in kg / mol
    pub fn molar_mass(&self) -> T {
        self.molar_mass
    }

    /// The number of atoms in each formula unit
    pub fn atoms_per_formula_unit(&self) -> usize {
        self.atoms_per_formula_unit
    }

    /// The finite difference settings used by [`Self::specific_heat`]
    pub fn finite_difference(&self) -> &FiniteDifference<T> {
        &self.finite_difference
    }

    /// `n N_A k_B / M`, the gas constant per unit mass scaled by the atom count
    fn gas_constant_per_unit_mass(&self) -> T {
        let avogadro = T::from_f64(AVOGADRO).expect("Avogadro constant must fit in T");
        let boltzmann = T::from_f64(BOLTZMANN).expect("Boltzmann constant must fit in T");
        let atoms = T::from_usize(self.atoms_per_formula_unit).expect("Atom count must fit in T");
        avogadro * boltzmann * atoms / self.molar_mass
    }

    /// The internal energy of the lattice, `3 n N_A k_B T D₃(T_D / T) / M` in J / kg
    pub fn internal_energy(&self, temperature: T) -> Result<T, DebyeError<T>> {
        if !(temperature > T::zero()) {
            return Err(DebyeError::InvalidTemperature(temperature));
        }
        let three = T::from_f64(3.0).expect("Literal must fit in T");
        let debye_3 = self
            .debye_function
            .debye_3(self.debye_temperature / temperature);
        Ok(three * self.gas_constant_per_unit_mass() * temperature * debye_3)
    }

    /// The heat capacity `dU/dT` in J / kg / K, found by differentiating the internal energy
    pub fn specific_heat(&self, temperature: T) -> Result<Derivative<T>, DebyeError<T>> {
        if !(temperature > T::zero()) {
            return Err(DebyeError::InvalidTemperature(temperature));
        }
        self.finite_difference
            .differentiate(|t| self.internal_energy(t), temperature)
    }

    /// The low temperature limit of the heat capacity, `12 π⁴ n N_A k_B T³ / (5 T_D³ M)`
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn specific_heat_low_temperature(&self, temperature: T) -> T {
        let reduced_temperature = temperature / self.debye_temperature;
        12.0 * T::pi().powi(4) / 5.0
            * self.gas_constant_per_unit_mass()
            * reduced_temperature.powi(3)
    }

    /// The Dulong-Petit limit of the heat capacity, `3 n N_A k_B / M`
    pub fn specific_heat_high_temperature(&self) -> T {
        T::from_f64(3.0).expect("Literal must fit in T") * self.gas_constant_per_unit_mass()
    }

    /// The temperature `T_D (5 / 4π⁴)^(1/3)` at which the two closed forms meet
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn crossover_temperature(&self) -> T {
        self.debye_temperature * (5.0 / (4.0 * T::pi().powi(4))).cbrt()
    }

    /// A quick approximation to the heat capacity
    ///
    /// Returns the Dulong-Petit value above [`Self::crossover_temperature`] and the `T³` law at or
    /// below it. The two forms meet at the crossover but their slopes do not, and close to the
    /// crossover the result can be well above the exact heat capacity.
    pub fn specific_heat_approx(&self, temperature: T) -> T {
        if temperature > self.crossover_temperature() {
            self.specific_heat_high_temperature()
        } else {
            self.specific_heat_low_temperature(temperature)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{DebyeError, DebyeFunction, DebyeModel, FiniteDifference};
    use crate::constants::{AVOGADRO, BOLTZMANN};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn aluminium() -> DebyeModel<f64> {
        DebyeModel::new(428.0, 0.026982, 1).unwrap()
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        for (debye_temperature, molar_mass, atoms) in
            [(0.0, 0.027, 1), (-1.0, 0.027, 1), (428.0, 0.0, 1), (428.0, 0.027, 0)]
        {
            assert!(matches!(
                DebyeModel::new(debye_temperature, molar_mass, atoms),
                Err(DebyeError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn non_positive_temperatures_are_rejected() {
        let model = aluminium();
        for temperature in [0.0, -1.0] {
            assert!(matches!(
                model.internal_energy(temperature),
                Err(DebyeError::InvalidTemperature(_))
            ));
            assert!(matches!(
                model.specific_heat(temperature),
                Err(DebyeError::InvalidTemperature(_))
            ));
        }
    }

    #[test]
    fn tiny_temperatures_give_finite_energies() {
        let model = aluminium();
        for temperature in [1e-3, 1e-108, 5e-324] {
            let energy = model.internal_energy(temperature).unwrap();
            assert!(energy.is_finite(), "U({}) = {}", temperature, energy);
            assert!(energy >= 0.0);
        }
        let specific_heat = model.specific_heat(1e-108).unwrap();
        assert!(specific_heat.value.is_finite());
        assert!(specific_heat.absolute_error.is_finite());
    }

    #[test]
    fn dulong_petit_limit_for_aluminium() {
        let model = aluminium();
        let expected = 3.0 * AVOGADRO * BOLTZMANN / 0.026982;
        assert_relative_eq!(model.specific_heat_high_temperature(), expected);
        assert_relative_eq!(model.specific_heat_high_temperature(), 924.4, epsilon = 0.1);
    }

    #[test]
    fn high_temperature_limit_scales_with_atom_count() {
        let gaas = DebyeModel::new(344.0, 0.144645, 2).unwrap();
        let expected = 6.0 * AVOGADRO * BOLTZMANN / 0.144645;
        assert_relative_eq!(gaas.specific_heat_high_temperature(), expected);
    }

    #[test]
    fn internal_energy_approaches_the_classical_limit() {
        // U → 3 n R T / M (1 - 3x/8 + x²/20) with x = T_D / T ≪ 1
        let model = aluminium();
        let temperature = 1e5;
        let classical = model.specific_heat_high_temperature() * temperature;
        let x = 428.0 / temperature;
        let correction = 1.0 - 3.0 * x / 8.0 + x * x / 20.0;
        assert_relative_eq!(
            model.internal_energy(temperature).unwrap(),
            classical * correction,
            max_relative = 1e-8
        );
    }

    #[test]
    fn specific_heat_follows_the_cubic_law_at_low_temperature() {
        let model = aluminium();
        for temperature in [1.0, 4.28, 10.0] {
            let specific_heat = model.specific_heat(temperature).unwrap();
            assert_relative_eq!(
                specific_heat.value,
                model.specific_heat_low_temperature(temperature),
                max_relative = 1e-5
            );
        }
    }

    #[test]
    fn specific_heat_reaches_the_dulong_petit_limit() {
        // c / c_DP ≈ 1 - (T_D / T)² / 20 at high temperature
        let model = aluminium();
        let temperature = 4280.0;
        let specific_heat = model.specific_heat(temperature).unwrap();
        assert_relative_eq!(
            specific_heat.value,
            model.specific_heat_high_temperature() * (1.0 - 0.01 / 20.0),
            max_relative = 1e-6
        );
    }

    #[test]
    fn specific_heat_matches_the_integral_form_at_intermediate_temperature() {
        // c = 9 n R / M (T / T_D)³ ∫₀^(T_D/T) x⁴ eˣ / (eˣ - 1)² dx, by Simpson's rule
        let model = aluminium();
        let temperature = 300.0;
        let upper = 428.0 / temperature;
        let intervals = 20_000;
        let step = upper / intervals as f64;
        let integrand = |x: f64| {
            if x > 0.0 {
                x.powi(4) * x.exp() / x.exp_m1().powi(2)
            } else {
                0.0
            }
        };
        let interior: f64 = (1..intervals)
            .map(|i| (if i % 2 == 1 { 4.0 } else { 2.0 }) * integrand(i as f64 * step))
            .sum();
        let integral = (integrand(0.0) + integrand(upper) + interior) * step / 3.0;
        let exact = 3.0 * model.specific_heat_high_temperature()
            * (temperature / 428.0).powi(3)
            * integral;

        let specific_heat = model.specific_heat(temperature).unwrap();
        assert_relative_eq!(specific_heat.value, exact, max_relative = 1e-6);
        assert!(specific_heat.absolute_error < 1e-3);
    }

    #[test]
    fn smaller_step_is_honoured() {
        let model = aluminium().with_finite_difference(FiniteDifference::new(0.01).unwrap());
        assert_relative_eq!(model.finite_difference().step(), 0.01);
        let specific_heat = model.specific_heat(300.0).unwrap();
        assert_relative_eq!(specific_heat.value, 836.798, max_relative = 1e-5);
    }

    #[test]
    fn crossover_temperature_equates_the_closed_forms() {
        let model = aluminium();
        let crossover = model.crossover_temperature();
        assert_relative_eq!(crossover, 100.202_973_603, max_relative = 1e-9);
        assert_relative_eq!(
            model.specific_heat_low_temperature(crossover),
            model.specific_heat_high_temperature(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn approximation_switches_form_at_the_crossover() {
        // The switch is a kink: values meet at the crossover, the slope jumps from 3c/T to zero
        let model = aluminium();
        let crossover = model.crossover_temperature();
        let below = crossover * (1.0 - 1e-9);
        let above = crossover * (1.0 + 1e-9);

        assert_eq!(
            model.specific_heat_approx(crossover),
            model.specific_heat_low_temperature(crossover)
        );
        assert_eq!(
            model.specific_heat_approx(below),
            model.specific_heat_low_temperature(below)
        );
        assert_eq!(
            model.specific_heat_approx(above),
            model.specific_heat_high_temperature()
        );

        let delta = 1e-3 * crossover;
        let left_slope = (model.specific_heat_approx(crossover)
            - model.specific_heat_approx(crossover - delta))
            / delta;
        let right_slope = (model.specific_heat_approx(crossover + 2.0 * delta)
            - model.specific_heat_approx(crossover + delta))
            / delta;
        assert_relative_eq!(
            left_slope,
            3.0 * model.specific_heat_high_temperature() / crossover,
            max_relative = 1e-2
        );
        assert_eq!(right_slope, 0.0);
    }

    #[test]
    fn approximation_overestimates_near_the_crossover() {
        let model = aluminium();
        let crossover = model.crossover_temperature();
        for temperature in [0.5 * crossover, crossover, 2.0 * crossover] {
            let exact = model.specific_heat(temperature).unwrap().value;
            assert!(model.specific_heat_approx(temperature) > exact);
        }
    }

    #[test]
    fn alternative_debye_function_is_used() {
        struct Classical;
        impl DebyeFunction<f64> for Classical {
            fn debye_3(&self, _x: f64) -> f64 {
                1.0
            }
        }
        let model = aluminium().with_debye_function(Classical);
        let temperature = 50.0;
        assert_relative_eq!(
            model.internal_energy(temperature).unwrap(),
            model.specific_heat_high_temperature() * temperature
        );
        assert_relative_eq!(
            model.specific_heat(temperature).unwrap().value,
            model.specific_heat_high_temperature(),
            max_relative = 1e-9
        );
    }

    proptest! {
        #[test]
        fn specific_heat_never_exceeds_the_dulong_petit_limit(temperature in 1f64..5000f64) {
            let model = aluminium();
            let specific_heat = model.specific_heat(temperature).unwrap();
            prop_assert!(specific_heat.value > 0.0);
            prop_assert!(
                specific_heat.value
                    < model.specific_heat_high_temperature() + specific_heat.absolute_error
            );
        }
    }
}
