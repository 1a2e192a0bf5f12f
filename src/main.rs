use std::path::PathBuf;

use clap::Parser;
use log::error;

use mpg_pendant::{Config, JogController, PendantDevice, PendantDriver, SimulatedMachine};

#[derive(Debug, Parser)]
#[command(version, about = "Drive a CNC machine from a USB MPG jog pendant")]
struct Cli {
    /// YAML config file. Defaults are used when it does not exist.
    #[arg(short, long, default_value = "pendant.yml")]
    config: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> mpg_pendant::Result<()> {
    let config = Config::load(&cli.config)?;

    let device = PendantDevice::connect(&config.usb)?;
    let machine = SimulatedMachine::new(config.simulation.clone());
    let controller = JogController::new(config.axis_table(), config.jog);

    PendantDriver::new(device, machine, controller).run()
}
