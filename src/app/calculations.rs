// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Calculations
//!
//! Delegated functions from `App` to run the quasi-Fermi and lattice calculations
//!

use super::{styles::Styles, Configuration};
use crate::{
    constants::ELECTRON_CHARGE,
    device::{Heterostructure, Lattice, Problem},
    error::EquilibriumError,
    fermi::FermiSolverBuilder,
};
use nalgebra::RealField;
use num_traits::ToPrimitive;
use owo_colors::OwoColorize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

fn as_f64<T: ToPrimitive>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Solve for the quasi-Fermi energy of the heterostructure at `path` and report the subband
/// populations
pub(crate) fn fermi_calculation<T>(
    path: PathBuf,
    config: &Configuration<T>,
    styles: &Styles,
    term: &console::Term,
) -> Result<(), EquilibriumError<T>>
where
    T: Copy + DeserializeOwned + RealField + ToPrimitive,
{
    tracing::info!("Quasi-Fermi calculation");
    let structure: Heterostructure<T> = Heterostructure::build(path)?;
    let ensemble = structure.carrier_ensemble()?;
    tracing::debug!(
        subbands = ensemble.subbands().len(),
        temperature = as_f64(ensemble.temperature()),
        population = as_f64(ensemble.population()),
        "Built carrier ensemble"
    );

    let tolerance = config.fermi.tolerance()?;
    let solver = FermiSolverBuilder::new()
        .with_ensemble(&ensemble)
        .with_tolerance(&tolerance)
        .build();
    let fermi_energy = solver.solve()?;

    let millielectron_volt = as_f64(fermi_energy) / (1e-3 * ELECTRON_CHARGE);
    tracing::info!(
        fermi_energy = millielectron_volt,
        residual = as_f64(ensemble.residual(fermi_energy)),
        "Converged"
    );

    term.write_line(&format!(
        "{}",
        "Quasi-Fermi energy".style(styles.heading_style)
    ))?;
    term.write_line(&format!(
        "  {} meV",
        format!("{:.4}", millielectron_volt).style(styles.value_style)
    ))?;
    term.write_line(&format!(
        "{}",
        "Subband populations".style(styles.heading_style)
    ))?;
    for (index, (subband, population)) in ensemble
        .subbands()
        .iter()
        .zip(ensemble.populations(fermi_energy).iter())
        .enumerate()
    {
        term.write_line(&format!(
            "  {:>3} {:>12.4} meV {:>14.4e} m^-2",
            index,
            as_f64(subband.minimum()) / (1e-3 * ELECTRON_CHARGE),
            as_f64(*population),
        ))?;
    }
    Ok(())
}

/// Sweep the Debye model of the lattice at `path` over temperature
pub(crate) fn debye_calculation<T>(
    path: PathBuf,
    config: &Configuration<T>,
    styles: &Styles,
    term: &console::Term,
) -> Result<(), EquilibriumError<T>>
where
    T: Copy + DeserializeOwned + RealField + ToPrimitive,
{
    tracing::info!("Lattice heat capacity calculation");
    let lattice: Lattice<T> = Lattice::build(path)?;
    let model = lattice
        .debye_model()?
        .with_finite_difference(config.debye.finite_difference()?);
    tracing::debug!(
        debye_temperature = as_f64(model.debye_temperature()),
        crossover_temperature = as_f64(model.crossover_temperature()),
        "Built Debye model"
    );

    term.write_line(&format!(
        "{}",
        format!(
            "{:>10} {:>14} {:>14} {:>12} {:>14}",
            "T (K)", "U (J/kg)", "c (J/kg/K)", "error", "c approx"
        )
        .style(styles.heading_style)
    ))?;
    for temperature in lattice.sweep.temperatures()? {
        let internal_energy = model.internal_energy(temperature)?;
        let specific_heat = model.specific_heat(temperature)?;
        let approximation = model.specific_heat_approx(temperature);
        tracing::trace!(
            temperature = as_f64(temperature),
            specific_heat = as_f64(specific_heat.value),
            absolute_error = as_f64(specific_heat.absolute_error),
            "Evaluated lattice"
        );
        term.write_line(&format!(
            "{:>10.2} {:>14.6e} {:>14.6e} {:>12.2e} {:>14.6e}",
            as_f64(temperature),
            as_f64(internal_energy),
            as_f64(specific_heat.value),
            as_f64(specific_heat.absolute_error),
            as_f64(approximation),
        ))?;
    }
    if model.crossover_temperature() < lattice.sweep.end
        && model.crossover_temperature() >= lattice.sweep.start
    {
        term.write_line(&format!(
            "{}",
            format!(
                "the approximation switches form at {:.2} K",
                as_f64(model.crossover_temperature())
            )
            .style(styles.warning_style)
        ))?;
    }
    Ok(())
}
