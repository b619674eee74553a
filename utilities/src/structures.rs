use nalgebra::RealField;
use std::path::PathBuf;
use transporter_equilibrium::{
    debye::DebyeModel,
    device::{Heterostructure, Lattice, Problem},
    fermi::CarrierEnsemble,
};

fn structure_path(name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "..", "structures", name]
        .iter()
        .collect()
}

pub fn construct_quantum_well<T>() -> CarrierEnsemble<T>
where
    T: RealField + Copy + serde::de::DeserializeOwned,
{
    let structure: Heterostructure<T> =
        Heterostructure::build(structure_path("quantum_well.toml")).unwrap();
    structure.carrier_ensemble().unwrap()
}

pub fn construct_aluminium<T>() -> (DebyeModel<T>, Vec<T>)
where
    T: RealField + Copy + serde::de::DeserializeOwned,
{
    let lattice: Lattice<T> = Lattice::build(structure_path("aluminium.toml")).unwrap();
    let temperatures = lattice.sweep.temperatures().unwrap().collect();
    (lattice.debye_model().unwrap(), temperatures)
}
