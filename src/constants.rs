// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines physical constants used in the statistics and lattice models

pub const AVOGADRO: f64 = 6.022140857e23; // Avogadro constant in 1 / mol
pub const BOLTZMANN: f64 = 1.38064852e-23; // The Boltzmann constant in m^2 kg / s^2 K
pub const ELECTRON_CHARGE: f64 = 1.60217662e-19; // Single electron charge in C
pub const ELECTRON_MASS: f64 = 9.10938356e-31; // Single electron mass
pub const HBAR: f64 = 1.0545718e-34; // Reduced Planck constant
