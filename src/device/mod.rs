// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Controls the deserialization of problem files, and the material table which fills in any
//! parameters a problem file leaves out

/// The compile-time material table
pub mod info_desk;
/// The deserialization of heterostructure and lattice problems
pub mod reader;

pub use info_desk::{Material, MaterialInfoDesk};
pub use reader::{Heterostructure, Lattice, Problem, SubbandSpecification, TemperatureSweep};

use miette::Diagnostic;
use nalgebra::RealField;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while reading a problem file or converting it into a model
pub enum DeviceError<T: RealField> {
    /// The file could not be read or deserialized
    #[error(transparent)]
    #[diagnostic(code(device::config_error))]
    Config(#[from] config::ConfigError),
    /// A subband gave neither an effective mass nor a material
    #[error("subband {0} needs either an `effective_mass` or a `material`")]
    #[diagnostic(code(device::missing_mass))]
    MissingMass(usize),
    /// A lattice parameter was neither given nor implied by a material
    #[error("the lattice needs a `{0}`, either directly or through a `material`")]
    #[diagnostic(code(device::missing_parameter))]
    MissingParameter(&'static str),
    /// The temperature sweep could not be laid out
    #[error("invalid temperature sweep: {0}")]
    #[diagnostic(code(device::invalid_sweep))]
    InvalidSweep(String),
    /// The subbands did not form a valid ensemble
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fermi(#[from] crate::fermi::FermiError<T>),
    /// The lattice parameters did not form a valid model
    #[error(transparent)]
    #[diagnostic(transparent)]
    Debye(#[from] crate::debye::DebyeError<T>),
}
