// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Fermi
//!
//! Equilibrium statistics of electrons confined to a ladder of quasi-two-dimensional subbands.
//!
//! The leaf functions in [`statistics`] evaluate occupation probabilities and subband populations
//! for a trial Fermi energy. A [`CarrierEnsemble`] collects the subband ladder with the temperature
//! and total areal population of the carriers, and the [`FermiSolver`] finds the single quasi-Fermi
//! energy which reproduces that population.
//!
//! All energies are in Joules, measured from whatever absolute reference the subband minima were
//! supplied on. Masses are in kilograms, temperatures in Kelvin and populations in m^-2.

mod solver;
pub mod statistics;

pub use solver::{FermiSolver, FermiSolverBuilder, Tolerance};
pub use statistics::{
    density_of_states, ionised_occupation_probability, occupation_probability,
    single_subband_fermi_energy, subband_population,
};

use itertools::Itertools;
use miette::Diagnostic;
use nalgebra::{DVector, RealField};
use std::ops::Range;

/// The width of the search window on either side of the subband ladder, in units of `k_B T`
const SEARCH_WINDOW_THERMAL_ENERGIES: f64 = 100.0;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while evaluating carrier statistics or solving for the quasi-Fermi energy
pub enum FermiError<T: RealField> {
    /// A temperature dependent quantity was requested at a non-positive temperature
    #[error("temperature must be positive, found {0} K")]
    #[diagnostic(code(fermi::invalid_temperature))]
    InvalidTemperature(T),
    /// The areal population was negative, or zero where a finite Fermi energy is required
    #[error("population of {0} m^-2 is not valid here")]
    #[diagnostic(code(fermi::invalid_population))]
    InvalidPopulation(T),
    /// A density-of-states mass was non-positive
    #[error("density-of-states mass must be positive, found {0} kg")]
    #[diagnostic(code(fermi::invalid_mass))]
    InvalidMass(T),
    /// The subband minima and masses were supplied as arrays of different length
    #[error("received {minima} subband minima but {masses} masses")]
    #[diagnostic(code(fermi::mismatched_ladder))]
    MismatchedLadder {
        /// Number of subband minima supplied
        minima: usize,
        /// Number of masses supplied
        masses: usize,
    },
    /// A carrier ensemble needs at least one subband
    #[error("a carrier ensemble needs at least one subband")]
    #[diagnostic(code(fermi::empty_ensemble))]
    EmptyEnsemble,
    /// The convergence tolerance of the bisection was not positive
    #[error("bisection tolerance must be positive, found {0} J")]
    #[diagnostic(code(fermi::invalid_tolerance))]
    InvalidTolerance(T),
    /// The bisection was allowed no iterations
    #[error("bisection needs an iteration ceiling of at least one")]
    #[diagnostic(code(fermi::invalid_iteration_ceiling))]
    InvalidIterationCeiling,
    /// The population residual does not change sign across the search window
    #[error("no quasi-Fermi energy in the search window [{lower}, {upper}] J")]
    #[diagnostic(
        code(fermi::no_solution_in_range),
        help("the requested population cannot be reached by this subband ladder at this temperature")
    )]
    NoSolutionInRange {
        /// Lower edge of the search window
        lower: T,
        /// Upper edge of the search window
        upper: T,
    },
    /// The bisection ran out of iterations before the bracket closed to the tolerance
    #[error("bisection did not converge within {0} iterations")]
    #[diagnostic(code(fermi::maximum_iterations))]
    MaximumIterationsReached(usize),
}

/// A single quantised subband, described by its minimum energy and density-of-states mass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Subband<T> {
    minimum: T,
    mass: T,
}

impl<T: Copy + RealField> Subband<T> {
    /// Creates a subband with minimum energy `minimum` in Joules and density-of-states mass `mass` in kg
    pub fn new(minimum: T, mass: T) -> Result<Self, FermiError<T>> {
        if !(mass > T::zero()) {
            return Err(FermiError::InvalidMass(mass));
        }
        Ok(Self { minimum, mass })
    }

    /// The energy of the subband minimum
    pub fn minimum(&self) -> T {
        self.minimum
    }

    /// The density-of-states effective mass
    pub fn mass(&self) -> T {
        self.mass
    }

    /// The two-dimensional density of states of the subband in J^-1 m^-2
    pub fn density_of_states(&self) -> T {
        statistics::density_of_states(self.mass)
    }

    /// The areal population of the subband for a given Fermi energy and temperature
    pub fn population(&self, fermi_energy: T, temperature: T) -> Result<T, FermiError<T>> {
        subband_population(self.minimum, fermi_energy, self.mass, temperature)
    }
}

/// A ladder of subbands holding a known total population of carriers at a fixed temperature
#[derive(Clone, Debug)]
pub struct CarrierEnsemble<T> {
    subbands: Vec<Subband<T>>,
    temperature: T,
    population: T,
    /// Cached `k_B T`, always positive
    thermal_energy: T,
}

impl<T: Copy + RealField> CarrierEnsemble<T> {
    /// Creates an ensemble from a ladder of subbands, a temperature in K and a total population in m^-2
    pub fn new(
        subbands: Vec<Subband<T>>,
        temperature: T,
        population: T,
    ) -> Result<Self, FermiError<T>> {
        let thermal_energy = statistics::thermal_energy(temperature)?;
        if subbands.is_empty() {
            return Err(FermiError::EmptyEnsemble);
        }
        if !(population >= T::zero()) {
            return Err(FermiError::InvalidPopulation(population));
        }
        Ok(Self {
            subbands,
            temperature,
            population,
            thermal_energy,
        })
    }

    /// Creates an ensemble from parallel arrays of subband minima and density-of-states masses
    pub fn from_minima_and_masses(
        minima: &[T],
        masses: &[T],
        temperature: T,
        population: T,
    ) -> Result<Self, FermiError<T>> {
        if minima.len() != masses.len() {
            return Err(FermiError::MismatchedLadder {
                minima: minima.len(),
                masses: masses.len(),
            });
        }
        let subbands = minima
            .iter()
            .zip(masses)
            .map(|(&minimum, &mass)| Subband::new(minimum, mass))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(subbands, temperature, population)
    }

    /// The subband ladder
    pub fn subbands(&self) -> &[Subband<T>] {
        &self.subbands
    }

    /// The carrier temperature in K
    pub fn temperature(&self) -> T {
        self.temperature
    }

    /// The target total areal population in m^-2
    pub fn population(&self) -> T {
        self.population
    }

    /// The window searched for the quasi-Fermi energy
    ///
    /// The window runs from `100 k_B T` below the lowest subband minimum to `100 k_B T` above the
    /// highest, which for an ordered ladder are the first and last subbands.
    pub fn search_window(&self) -> Range<T> {
        let (lowest, highest) = self
            .subbands
            .iter()
            .map(|subband| subband.minimum)
            .minmax()
            .into_option()
            .expect("A carrier ensemble always holds at least one subband");
        let margin = T::from_f64(SEARCH_WINDOW_THERMAL_ENERGIES)
            .expect("Window width must fit in T")
            * self.thermal_energy;
        Range {
            start: lowest - margin,
            end: highest + margin,
        }
    }

    /// The population of each subband at a trial Fermi energy
    pub fn populations(&self, fermi_energy: T) -> DVector<T> {
        DVector::from_iterator(
            self.subbands.len(),
            self.subbands
                .iter()
                .map(|subband| self.subband_population(subband, fermi_energy)),
        )
    }

    /// The total population of the ladder at a trial Fermi energy
    pub fn total_population(&self, fermi_energy: T) -> T {
        self.subbands.iter().fold(T::zero(), |acc, subband| {
            acc + self.subband_population(subband, fermi_energy)
        })
    }

    /// The signed difference between the population at a trial Fermi energy and the target
    pub fn residual(&self, fermi_energy: T) -> T {
        self.total_population(fermi_energy) - self.population
    }

    /// The largest rate of change of the total population with Fermi energy, `Σ ρ_i`
    ///
    /// Multiplying an energy tolerance by this slope bounds the corresponding population error.
    pub fn maximum_population_slope(&self) -> T {
        self.subbands
            .iter()
            .fold(T::zero(), |acc, subband| acc + subband.density_of_states())
    }

    fn subband_population(&self, subband: &Subband<T>, fermi_energy: T) -> T {
        statistics::areal_density(
            subband.density_of_states(),
            self.thermal_energy,
            (fermi_energy - subband.minimum) / self.thermal_energy,
        )
    }
}
