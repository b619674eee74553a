pub mod structures;

use rand::{thread_rng, Rng};
use transporter_equilibrium::fermi::CarrierEnsemble;

const ELECTRON_CHARGE: f64 = 1.60217662e-19;
const ELECTRON_MASS: f64 = 9.10938356e-31;

/// A ladder of `number_of_subbands` GaAs-like subbands, spaced by random gaps of 5 to 50 meV
pub fn construct_random_ensemble(
    number_of_subbands: usize,
    temperature: f64,
    population: f64,
) -> CarrierEnsemble<f64> {
    let mut rng = thread_rng();
    let mut minimum = 0.0;
    let minima = (0..number_of_subbands)
        .map(|_| {
            let current = minimum;
            minimum += rng.gen_range(5e-3..50e-3) * ELECTRON_CHARGE;
            current
        })
        .collect::<Vec<_>>();
    let masses = (0..number_of_subbands)
        .map(|_| rng.gen_range(0.06..0.1) * ELECTRON_MASS)
        .collect::<Vec<_>>();
    CarrierEnsemble::from_minima_and_masses(&minima, &masses, temperature, population)
        .expect("Ensemble data is invalid")
}
