use transporter_equilibrium::app::run;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    run::<f64>()
}
