// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The aggregate error type for the driver

use miette::Diagnostic;
use nalgebra::RealField;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Every failure which can surface while reading a problem and running a calculation
pub enum EquilibriumError<T: RealField> {
    /// Failure to read a file, or to write to the terminal
    #[error(transparent)]
    #[diagnostic(code(equilibrium::io_error))]
    Io(#[from] std::io::Error),
    /// Failure to assemble or deserialize the layered configuration
    #[error(transparent)]
    #[diagnostic(code(equilibrium::config_error))]
    Config(#[from] config::ConfigError),
    /// An invalid problem file
    #[error(transparent)]
    #[diagnostic(transparent)]
    Device(#[from] crate::device::DeviceError<T>),
    /// Failure in the quasi-Fermi calculation
    #[error(transparent)]
    #[diagnostic(transparent)]
    Fermi(#[from] crate::fermi::FermiError<T>),
    /// Failure in the lattice calculation
    #[error(transparent)]
    #[diagnostic(transparent)]
    Debye(#[from] crate::debye::DebyeError<T>),
}
