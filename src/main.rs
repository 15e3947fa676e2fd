use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use tline::component::AppComponent;
use tline::config::{Config, ConfigStore};
use tline::features::splash::{SplashInteractor, StaticSession};
use tline::loader::LoaderRegistry;
use tline::simulation::{self, SimulationOptions, SimulationReport};
use tline::ui::host::{HostEnvironment, LaunchInput};
use tline::ui::view::TracingOverlay;

#[derive(Parser, Debug)]
#[command(name = "tline", version, about = "Presenter retention lifecycle driver")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log lifecycle events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive the splash screen through create, start, recreate and finish
    Simulate {
        /// Start the host before the presenter delivery is processed
        #[arg(long)]
        start_before_delivery: bool,

        /// Destroy/recreate cycles before finishing
        #[arg(long, default_value_t = 1)]
        recreations: u32,

        /// Pretend a session is stored
        #[arg(long)]
        signed_in: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tline::logging::init_tracing(cli.verbose);

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let store = ConfigStore::open(path.clone())
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    match cli.command {
        Command::Simulate {
            start_before_delivery,
            recreations,
            signed_in,
            json,
        } => {
            let component = AppComponent::new(store);
            component.provide::<Arc<dyn SplashInteractor>>(Arc::new(StaticSession(signed_in)));
            let env = HostEnvironment {
                registry: LoaderRegistry::new(),
                component,
                overlay: Arc::new(TracingOverlay),
            };
            let options = SimulationOptions {
                start_before_delivery,
                recreations,
            };
            let launch = LaunchInput::new().with_extra("source", "cli");

            let report = simulation::run(options, &env, &launch).context("Simulation failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Config => {
            print!("{}", toml::to_string_pretty(&store.get())?);
        }
    }

    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!("chain {}", report.chain);
    for entry in &report.trace {
        println!(
            "{:<14} {:<4} {:<45} delivered={:<5} attached={}",
            entry.step, entry.instance, entry.state, entry.presenter_delivered, entry.view_attached
        );
    }
    match report.destination {
        Some(destination) => println!("destination: {:?}", destination),
        None => println!("destination: none"),
    }
    println!("retained after finish: {}", report.retained_after_finish);
}
