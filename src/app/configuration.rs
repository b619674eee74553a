// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Configuration
//!
//! Numerical settings which are not part of a problem file. The defaults are read from
//! `.config/default.toml`, and may be overridden by `.config/{RUN_MODE}.toml`.

use crate::{
    debye::{DebyeError, FiniteDifference},
    fermi::{FermiError, Tolerance},
};
use config::{Config, ConfigError, File};
use nalgebra::RealField;
use serde::{de::DeserializeOwned, Deserialize};
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize)]
/// The layered configuration of the driver
pub struct Configuration<T> {
    pub(crate) fermi: FermiConfiguration<T>,
    pub(crate) debye: DebyeConfiguration<T>,
    pub(crate) telemetry: TelemetryConfiguration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FermiConfiguration<T> {
    /// Closing width of the bisection bracket in eV
    pub(crate) tolerance: T,
    pub(crate) maximum_iterations: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DebyeConfiguration<T> {
    /// Initial finite difference step in K
    pub(crate) derivative_step: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TelemetryConfiguration {
    pub(crate) log_directory: PathBuf,
}

impl<T: DeserializeOwned> Configuration<T> {
    /// Read the configuration for the current `RUN_MODE`
    pub fn build() -> Result<Self, ConfigError> {
        // Without a run mode we assume a development build
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings for the calculations which we use in the general case
            .add_source(File::with_name(".config/default"))
            // The override settings which may be set by the user, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false))
            .build()?;

        s.try_deserialize()
    }
}

impl<T: Copy + RealField> FermiConfiguration<T> {
    pub(crate) fn tolerance(&self) -> Result<Tolerance<T>, FermiError<T>> {
        Tolerance::from_electron_volts(self.tolerance, self.maximum_iterations)
    }
}

impl<T: Copy + RealField> DebyeConfiguration<T> {
    pub(crate) fn finite_difference(&self) -> Result<FiniteDifference<T>, DebyeError<T>> {
        FiniteDifference::new(self.derivative_step)
    }
}
