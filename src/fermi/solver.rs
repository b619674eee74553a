// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Bisection for the quasi-Fermi energy of a multi-subband carrier ensemble

use super::{CarrierEnsemble, FermiError};
use crate::constants::ELECTRON_CHARGE;
use nalgebra::RealField;

/// Default width at which the bisection bracket is considered closed, in eV
const DEFAULT_ENERGY_TOLERANCE: f64 = 1e-8;
const DEFAULT_MAXIMUM_ITERATIONS: usize = 200;

/// Convergence settings for the bisection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance<T> {
    /// Bracket width in Joules below which the bisection stops
    energy: T,
    /// Hard ceiling on the number of bisection steps
    maximum_iterations: usize,
}

impl<T: Copy + RealField> Tolerance<T> {
    /// Creates a tolerance from an energy in Joules
    pub fn new(energy: T, maximum_iterations: usize) -> Result<Self, FermiError<T>> {
        if !(energy > T::zero()) {
            return Err(FermiError::InvalidTolerance(energy));
        }
        if maximum_iterations == 0 {
            return Err(FermiError::InvalidIterationCeiling);
        }
        Ok(Self {
            energy,
            maximum_iterations,
        })
    }

    /// Creates a tolerance from an energy in electron volts
    pub fn from_electron_volts(energy: T, maximum_iterations: usize) -> Result<Self, FermiError<T>> {
        let electron_charge =
            T::from_f64(ELECTRON_CHARGE).expect("Electron charge must fit in T");
        Self::new(energy * electron_charge, maximum_iterations)
    }

    /// The closing width of the bracket in Joules
    pub fn energy(&self) -> T {
        self.energy
    }

    /// The maximum number of bisection steps
    pub fn maximum_iterations(&self) -> usize {
        self.maximum_iterations
    }

    /// The population error in m^-2 which corresponds to the energy tolerance for `ensemble`
    pub fn population_equivalent(&self, ensemble: &CarrierEnsemble<T>) -> T {
        ensemble.maximum_population_slope() * self.energy
    }
}

impl<T: Copy + RealField> Default for Tolerance<T> {
    fn default() -> Self {
        let electron_charge =
            T::from_f64(ELECTRON_CHARGE).expect("Electron charge must fit in T");
        Self {
            energy: T::from_f64(DEFAULT_ENERGY_TOLERANCE).expect("Tolerance must fit in T")
                * electron_charge,
            maximum_iterations: DEFAULT_MAXIMUM_ITERATIONS,
        }
    }
}

/// Builder for the Fermi solver, attaching the ensemble and an optional tolerance
pub struct FermiSolverBuilder<RefEnsemble, RefTolerance> {
    ensemble: RefEnsemble,
    tolerance: RefTolerance,
}

impl FermiSolverBuilder<(), ()> {
    /// Initialise an empty builder
    pub fn new() -> Self {
        Self {
            ensemble: (),
            tolerance: (),
        }
    }
}

impl Default for FermiSolverBuilder<(), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefEnsemble, RefTolerance> FermiSolverBuilder<RefEnsemble, RefTolerance> {
    /// Attach the carrier ensemble to solve
    pub fn with_ensemble<Ensemble>(
        self,
        ensemble: &Ensemble,
    ) -> FermiSolverBuilder<&Ensemble, RefTolerance> {
        FermiSolverBuilder {
            ensemble,
            tolerance: self.tolerance,
        }
    }

    /// Attach the convergence settings
    pub fn with_tolerance<Tol>(self, tolerance: &Tol) -> FermiSolverBuilder<RefEnsemble, &Tol> {
        FermiSolverBuilder {
            ensemble: self.ensemble,
            tolerance,
        }
    }
}

impl<'a, T: Copy + RealField> FermiSolverBuilder<&'a CarrierEnsemble<T>, &'a Tolerance<T>> {
    /// Build the solver with the attached tolerance
    pub fn build(self) -> FermiSolver<'a, T> {
        FermiSolver {
            ensemble: self.ensemble,
            tolerance: *self.tolerance,
        }
    }
}

impl<'a, T: Copy + RealField> FermiSolverBuilder<&'a CarrierEnsemble<T>, ()> {
    /// Build the solver with the default tolerance of 0.01 μeV
    pub fn build(self) -> FermiSolver<'a, T> {
        FermiSolver {
            ensemble: self.ensemble,
            tolerance: Tolerance::default(),
        }
    }
}

/// Finds the quasi-Fermi energy of a [`CarrierEnsemble`] by bisection
#[derive(Debug)]
pub struct FermiSolver<'a, T> {
    ensemble: &'a CarrierEnsemble<T>,
    tolerance: Tolerance<T>,
}

impl<T: Copy + RealField> FermiSolver<'_, T> {
    /// The convergence settings in use
    pub fn tolerance(&self) -> &Tolerance<T> {
        &self.tolerance
    }

    /// Find the Fermi energy at which the ensemble holds its target population
    ///
    /// The root is bracketed by the ensemble's search window. If the population residual has the same
    /// sign at both edges the target cannot be reached inside the window and `NoSolutionInRange` is
    /// returned; the window is never widened. Otherwise the bracket is halved until narrower than the
    /// tolerance, and the midpoint of the final bracket is returned.
    pub fn solve(&self) -> Result<T, FermiError<T>> {
        let window = self.ensemble.search_window();
        let (mut lower, mut upper) = (window.start, window.end);

        let lower_is_above = self.ensemble.residual(lower) >= T::zero();
        let upper_is_above = self.ensemble.residual(upper) >= T::zero();
        if lower_is_above == upper_is_above {
            return Err(FermiError::NoSolutionInRange { lower, upper });
        }

        let two = T::one() + T::one();
        let mut iterations = 0;
        while upper - lower > self.tolerance.energy {
            if iterations == self.tolerance.maximum_iterations {
                return Err(FermiError::MaximumIterationsReached(iterations));
            }
            let midpoint = (lower + upper) / two;
            if (self.ensemble.residual(midpoint) >= T::zero()) == lower_is_above {
                lower = midpoint;
            } else {
                upper = midpoint;
            }
            iterations += 1;
        }

        Ok((lower + upper) / two)
    }
}
