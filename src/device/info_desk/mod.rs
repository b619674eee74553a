// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Generates and returns compile-time defined material properties
//!
//! This module defines the `Material` enum which represents all materials known to the problem
//! readers. Each variant yields a `MaterialInfoDesk` holding the lattice parameters needed by the
//! Debye model and the density-of-states mass used for subbands in that material.

mod materials;

pub use materials::Material;

/// Struct holding the material information used to build carrier ensembles and lattice models
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialInfoDesk<T> {
    /// The Debye temperature in K
    pub debye_temperature: T,
    /// The molar mass of one formula unit in kg / mol
    pub molar_mass: T,
    /// The number of atoms in one formula unit
    pub atoms_per_formula_unit: usize,
    /// The conduction band density-of-states mass in units of the free electron mass
    pub effective_mass: T,
}
