use std::path;

use anyhow::Context as _;
use clap::Parser;
use proc_exit::prelude::*;

use sitewright::Environments;
use sitewright::generator::GeneratorConfig;

#[derive(Debug, Parser)]
#[command(name = "sitewright", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Environments file to use [default: _sitewright.yml]
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<path::PathBuf>,

    #[command(flatten)]
    color: colorchoice_clap::Color,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// List the known environment identifiers
    Environments,
    /// Resolve an environment and print the generator configuration
    Resolve {
        environment: String,
        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: Format,
    },
    /// Resolve every environment in the table, reporting invalid entries
    Check,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let args = Args::parse();
    args.color.write_global();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let environments =
        load_environments(args.config.as_deref()).with_code(proc_exit::Code::FAILURE)?;

    match args.command {
        Command::Environments => {
            for name in environments.names() {
                println!("{name}");
            }
            Ok(())
        }
        Command::Resolve {
            environment,
            format,
        } => resolve(&environments, &environment, format),
        Command::Check => check(&environments),
    }
}

fn load_environments(path: Option<&path::Path>) -> anyhow::Result<Environments> {
    let environments = match path {
        Some(path) => {
            log::debug!("Using environments file `{}`", path.display());
            Environments::from_file(path)?
        }
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            Environments::from_cwd(cwd)?
        }
    };
    Ok(environments)
}

fn resolve(environments: &Environments, environment: &str, format: Format) -> proc_exit::ExitResult {
    let site = environments
        .resolve(environment)
        .with_code(proc_exit::Code::FAILURE)?;
    let generator = GeneratorConfig::from_site(&site);
    match format {
        Format::Yaml => print!("{generator}"),
        Format::Json => {
            let rendered = generator.to_json().with_code(proc_exit::Code::FAILURE)?;
            println!("{rendered}");
        }
    }
    Ok(())
}

fn check(environments: &Environments) -> proc_exit::ExitResult {
    let mut failed = false;
    for name in environments.names() {
        match environments.resolve(name) {
            Ok(site) => println!("{name}: {}", site.url),
            Err(err) => {
                eprintln!("{name}: {err}");
                failed = true;
            }
        }
    }
    if failed {
        Err(proc_exit::Exit::new(proc_exit::Code::FAILURE))
    } else {
        Ok(())
    }
}
