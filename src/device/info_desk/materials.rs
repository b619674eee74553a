// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use super::MaterialInfoDesk;
use nalgebra::RealField;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[non_exhaustive]
/// Enum with all implemented material types
///
/// As materials may be added in future this is labelled as `non_exhaustive`
pub enum Material {
    /// Gallium arsenide
    GaAs,
    /// Aluminium arsenide
    AlAs,
    /// Silicon
    Si,
    /// Aluminium
    Al,
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Material::GaAs => {
                write!(f, "GaAs")
            }
            Material::AlAs => {
                write!(f, "AlAs")
            }
            Material::Si => {
                write!(f, "Si")
            }
            Material::Al => {
                write!(f, "Al")
            }
        }
    }
}

impl Material {
    /// Builds an instance of `MaterialInfoDesk` for the given `Material` variant
    pub fn get_info<T: Copy + RealField>(&self) -> MaterialInfoDesk<T> {
        match self {
            Material::GaAs => MaterialInfoDesk::gaas(),
            Material::AlAs => MaterialInfoDesk::alas(),
            Material::Si => MaterialInfoDesk::si(),
            Material::Al => MaterialInfoDesk::al(),
        }
    }
}

impl<T: Copy + RealField> MaterialInfoDesk<T> {
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    fn gaas() -> Self {
        Self {
            debye_temperature: 344.0,
            molar_mass: 0.144645,
            atoms_per_formula_unit: 2,
            effective_mass: 0.067,
        }
    }

    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    fn alas() -> Self {
        Self {
            debye_temperature: 446.0,
            molar_mass: 0.101903,
            atoms_per_formula_unit: 2,
            effective_mass: 0.15,
        }
    }

    // Transverse mass of the two (100) valleys
    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    fn si() -> Self {
        Self {
            debye_temperature: 645.0,
            molar_mass: 0.0280855,
            atoms_per_formula_unit: 1,
            effective_mass: 0.19,
        }
    }

    #[numeric_literals::replace_float_literals(T::from_f64(literal).unwrap())]
    fn al() -> Self {
        Self {
            debye_temperature: 428.0,
            molar_mass: 0.026982,
            atoms_per_formula_unit: 1,
            effective_mass: 1.0,
        }
    }
}
