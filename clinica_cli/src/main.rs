use clap::{Parser, Subcommand};
use clinica_core::*;
use std::io;
use std::path::PathBuf;

mod render;
mod shell;

#[derive(Parser)]
#[command(name = "turnos")]
#[command(about = "Clinic appointment scheduling system", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start with an empty clinic instead of the sample directory
    #[arg(long, global = true)]
    no_seed: bool,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive menu (default)
    Shell,

    /// Print the sample patients and practitioners and exit
    Sample,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    clinica_core::logging::init_with_level(&config.logging.level);

    match cli.command {
        Some(Commands::Sample) => cmd_sample(),
        Some(Commands::Shell) | None => cmd_shell(&config, cli.no_seed),
    }
}

fn cmd_shell(config: &Config, no_seed: bool) -> Result<()> {
    let mut engine = SchedulingEngine::new(ClinicRegistry::new());

    if config.clinic.seed_sample_data && !no_seed {
        let added = load_sample_data(&mut engine)?;
        println!("Sample data loaded ({} entries).", added);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell::Shell::new(engine, config, stdin.lock(), stdout.lock()).run()
}

fn cmd_sample() -> Result<()> {
    let mut engine = SchedulingEngine::default();
    load_sample_data(&mut engine)?;

    println!("--- Practitioners ---");
    for practitioner in engine.list_practitioners() {
        println!("{}", render::practitioner(practitioner));
    }
    println!();
    println!("--- Patients ---");
    for patient in engine.list_patients() {
        println!("{}", render::patient(patient));
    }
    Ok(())
}
