// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Problem files are written in convenient units: subband energies in meV and masses relative to
//! the free electron mass. They are converted to SI when the models are built.

use super::{DeviceError, Material};
use crate::{
    constants::{ELECTRON_CHARGE, ELECTRON_MASS},
    debye::DebyeModel,
    fermi::{CarrierEnsemble, Subband},
};
use config::{Config, File, Source};
use nalgebra::RealField;
use serde::{de::DeserializeOwned, Deserialize};
use std::path::PathBuf;

fn deserialize<P, S>(source: S) -> Result<P, DeviceError<P::Field>>
where
    P: Problem,
    S: Source + Send + Sync + 'static,
{
    let s = Config::builder().add_source(source).build()?;
    Ok(s.try_deserialize()?)
}

/// A problem which can be read from a file
pub trait Problem: DeserializeOwned {
    /// The scalar type of the problem
    type Field: RealField;

    /// Read the problem from the file at `path`, whose format is inferred from its extension
    fn build(path: PathBuf) -> Result<Self, DeviceError<Self::Field>> {
        deserialize(File::from(path))
    }
}

/// A ladder of subbands holding a fixed areal population
#[derive(Debug, Deserialize)]
pub struct Heterostructure<T> {
    /// The carrier temperature in K
    pub temperature: T,
    /// The total areal population in m^-2
    pub population: T,
    /// The subband ladder
    pub subbands: Vec<SubbandSpecification<T>>,
}

/// One subband of a `Heterostructure`
#[derive(Debug, Deserialize)]
pub struct SubbandSpecification<T> {
    /// The subband minimum in meV
    pub energy: T,
    /// The density-of-states mass in units of the free electron mass
    pub effective_mass: Option<T>,
    /// The material the subband is confined in, supplying a mass when none is given
    pub material: Option<Material>,
}

impl<T: DeserializeOwned + Copy + RealField> Problem for Heterostructure<T> {
    type Field = T;
}

impl<T: Copy + RealField> SubbandSpecification<T> {
    /// The mass ratio, preferring an explicit `effective_mass` over the material value
    fn mass_ratio(&self) -> Option<T> {
        self.effective_mass
            .or_else(|| self.material.map(|material| material.get_info::<T>().effective_mass))
    }
}

impl<T: Copy + RealField> Heterostructure<T> {
    /// Converts the problem to an SI `CarrierEnsemble`
    pub fn carrier_ensemble(&self) -> Result<CarrierEnsemble<T>, DeviceError<T>> {
        let electron_volt = T::from_f64(ELECTRON_CHARGE).expect("Electron charge must fit in T");
        let electron_mass = T::from_f64(ELECTRON_MASS).expect("Electron mass must fit in T");
        let millis = T::from_f64(1e-3).expect("Literal must fit in T");

        let subbands = self
            .subbands
            .iter()
            .enumerate()
            .map(|(index, specification)| -> Result<Subband<T>, DeviceError<T>> {
                let mass_ratio = specification
                    .mass_ratio()
                    .ok_or(DeviceError::MissingMass(index))?;
                Ok(Subband::new(
                    specification.energy * millis * electron_volt,
                    mass_ratio * electron_mass,
                )?)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CarrierEnsemble::new(
            subbands,
            self.temperature,
            self.population,
        )?)
    }
}

/// A lattice whose heat capacity is swept over temperature
///
/// Any of the Debye parameters given explicitly override those of the `material`.
#[derive(Debug, Deserialize)]
pub struct Lattice<T> {
    /// The material supplying default parameters
    pub material: Option<Material>,
    /// The Debye temperature in K
    pub debye_temperature: Option<T>,
    /// The molar mass of one formula unit in kg / mol
    pub molar_mass: Option<T>,
    /// The number of atoms in one formula unit
    pub atoms_per_formula_unit: Option<usize>,
    /// The temperatures to evaluate the model at
    pub sweep: TemperatureSweep<T>,
}

/// An evenly spaced range of temperatures, including both ends
#[derive(Debug, Deserialize)]
pub struct TemperatureSweep<T> {
    /// The first temperature in K
    pub start: T,
    /// The last temperature in K
    pub end: T,
    /// The number of temperatures in the sweep
    pub number_of_points: usize,
}

impl<T: DeserializeOwned + Copy + RealField> Problem for Lattice<T> {
    type Field = T;
}

impl<T: Copy + RealField> Lattice<T> {
    /// Builds the Debye model for the lattice
    pub fn debye_model(&self) -> Result<DebyeModel<T>, DeviceError<T>> {
        let info = self.material.map(|material| material.get_info::<T>());

        let debye_temperature = self
            .debye_temperature
            .or_else(|| info.map(|info| info.debye_temperature))
            .ok_or(DeviceError::MissingParameter("debye_temperature"))?;
        let molar_mass = self
            .molar_mass
            .or_else(|| info.map(|info| info.molar_mass))
            .ok_or(DeviceError::MissingParameter("molar_mass"))?;
        let atoms_per_formula_unit = self
            .atoms_per_formula_unit
            .or_else(|| info.map(|info| info.atoms_per_formula_unit))
            .ok_or(DeviceError::MissingParameter("atoms_per_formula_unit"))?;

        Ok(DebyeModel::new(
            debye_temperature,
            molar_mass,
            atoms_per_formula_unit,
        )?)
    }
}

impl<T: Copy + RealField> TemperatureSweep<T> {
    /// The temperatures in the sweep, in ascending order
    pub fn temperatures(&self) -> Result<impl Iterator<Item = T> + '_, DeviceError<T>> {
        if self.number_of_points == 0 {
            return Err(DeviceError::InvalidSweep(
                "a sweep needs at least one point".into(),
            ));
        }
        if !(self.start > T::zero()) || !(self.end >= self.start) {
            return Err(DeviceError::InvalidSweep(format!(
                "temperatures must satisfy 0 < start <= end, found {} to {}",
                self.start, self.end
            )));
        }
        let intervals = T::from_usize(self.number_of_points.saturating_sub(1).max(1))
            .expect("Point count must fit in T");
        let step = (self.end - self.start) / intervals;
        Ok((0..self.number_of_points).map(move |index| {
            self.start + step * T::from_usize(index).expect("Index must fit in T")
        }))
    }
}
