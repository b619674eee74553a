// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! Transporter-equilibrium computes equilibrium carrier and lattice statistics for semiconductor
//! heterostructures
//!
//! # Overview
//! Two independent models are provided. The first finds the quasi-Fermi energy of electrons confined
//! to a ladder of quasi-two-dimensional subbands, given their total areal population, by bisecting on
//! the sum of the Fermi-Dirac subband populations. The second evaluates the Debye model of the lattice:
//! the internal energy, a numerically differentiated heat capacity with an error estimate, and the
//! low and high temperature closed forms.
//!
//! # Usage
//! The models can be used directly as a library, or driven from the command line. For the latter
//! define a problem in a `.toml` file, for example a three subband quantum well:
//!
//! ```toml
//! temperature = 77.0
//! population = 5e15
//!
//! [[subbands]]
//! energy = 0.0
//! material = "GaAs"
//!
//! [[subbands]]
//! energy = 20.0
//! effective_mass = 0.067
//! ```
//!
//! and run with `--calculation fermi`. A lattice heat capacity sweep is described by
//!
//! ```toml
//! material = "Al"
//!
//! [sweep]
//! start = 10.0
//! end = 500.0
//! number_of_points = 50
//! ```
//!
//! and run with `--calculation debye`.

#![warn(missing_docs)]

/// The command line global application, tracing and display primitives
pub mod app;

/// Physical constants
mod constants;

/// The Debye model of the lattice heat capacity
pub mod debye;

/// Problem files and the material table
pub mod device;

/// Error handling
mod error;

/// Fermi statistics and the multi-subband quasi-Fermi solver
pub mod fermi;

pub use error::EquilibriumError;
