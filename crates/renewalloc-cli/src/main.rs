use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use env_logger::Builder;
use renewalloc_model::{report, FormulationOptions, Scenario};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "renewalloc")]
#[command(about = "Allocate solar and wind capacity to consumers with a linear program", long_about = None)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the allocation and print the result
    Allocate {
        /// Scenario file (JSON); the built-in example is used when omitted
        file: Option<PathBuf>,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Tie generation to total demand
        #[arg(long)]
        balanced: bool,
    },
    /// Print the linear program built for a scenario
    Formulate {
        /// Scenario file (JSON); the built-in example is used when omitted
        file: Option<PathBuf>,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Tie generation to total demand
        #[arg(long)]
        balanced: bool,
    },
    /// Check a scenario file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

fn load_scenario(file: Option<&Path>) -> Scenario {
    let Some(path) = file else {
        log::info!("no scenario file given, using the built-in example");
        return Scenario::example();
    };

    match Scenario::load(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn options(balanced: bool) -> FormulationOptions {
    if balanced {
        FormulationOptions::balanced()
    } else {
        FormulationOptions::default()
    }
}

fn main() {
    let cli = Cli::parse();

    Builder::new().filter_level(cli.verbose.log_level_filter()).init();

    match cli.command {
        Commands::Allocate { file, format, balanced } => {
            let scenario = load_scenario(file.as_deref());
            let result = scenario.allocate(options(balanced));

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&report::to_json(&result)).unwrap_or_default());
            } else if let Err(e) = report::write_report(&mut std::io::stdout().lock(), &result) {
                eprintln!("Error writing report: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Formulate { file, format, balanced } => {
            let scenario = load_scenario(file.as_deref());
            let problem = renewalloc_model::formulate(
                scenario.solar_capacity,
                scenario.wind_capacity,
                &scenario.consumers,
                options(balanced),
            );
            let form = problem.to_standard_form();

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&form).unwrap_or_default());
            } else {
                println!("Variables: {}", problem.variables.join(", "));
                println!("c = {:?}", form.c);
                println!();
                println!("Inequalities (A_ub x <= b_ub):");
                for (row, rhs) in form.a_ub.iter().zip(&form.b_ub) {
                    println!("  {:?} <= {:?}", row, rhs);
                }
                println!();
                println!("Equalities (A_eq x = b_eq):");
                for (row, rhs) in form.a_eq.iter().zip(&form.b_eq) {
                    println!("  {:?} = {:?}", row, rhs);
                }
                println!();
                println!("Bounds:");
                for (name, (lower, upper)) in problem.variables.iter().zip(&form.bounds) {
                    match upper {
                        Some(upper) => println!("  {:20} [{:?}, {:?}]", name, lower, upper),
                        None => println!("  {:20} [{:?}, inf)", name, lower),
                    }
                }
            }
        }
        Commands::Check { file } => {
            let scenario = match Scenario::load(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            };

            println!("✓ {} is valid", file.display());
            println!("  {} consumers", scenario.consumers.len());
            println!("  {} MW total capacity", scenario.total_capacity());
            println!("  {} MW total demand", scenario.total_demand());

            for warning in scenario.warnings() {
                println!("  warning: {}", warning);
            }
        }
    }
}
