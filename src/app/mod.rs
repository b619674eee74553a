// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! This module governs the high-level implementation of the calculations
mod calculations;
mod configuration;
mod styles;
mod telemetry;

pub use configuration::Configuration;

use clap::{ArgEnum, Parser};
use color_eyre::eyre::eyre;
use nalgebra::RealField;
use num_traits::ToPrimitive;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use styles::Styles;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    #[clap(arg_enum, short, long)]
    calculation: Calculation,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Info,
    Debug,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum Calculation {
    Fermi,
    Debye,
}

/// Parse the command line, set up telemetry and run the requested calculation
pub fn run<T>() -> color_eyre::Result<()>
where
    T: Copy + DeserializeOwned + RealField + ToPrimitive,
{
    let cli = App::parse();

    let config: Configuration<T> = Configuration::build()?;

    let (subscriber, _guard) =
        telemetry::get_subscriber(cli.log_level, &config.telemetry.log_directory);
    telemetry::init_subscriber(subscriber)?;

    tracing::info!(
        calculation = ?cli.calculation,
        path = ?cli.file_path,
        "Starting"
    );

    let path = cli
        .file_path
        .ok_or(eyre!("A file path needs to be passed."))?;

    let term = console::Term::stdout();
    let mut styles = Styles::default();
    if term.features().colors_supported() {
        styles.colorize();
    }

    match cli.calculation {
        Calculation::Fermi => calculations::fermi_calculation(path, &config, &styles, &term)?,
        Calculation::Debye => calculations::debye_calculation(path, &config, &styles, &term)?,
    }

    Ok(())
}
