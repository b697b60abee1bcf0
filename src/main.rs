use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, LevelFilter};
use std::path::PathBuf;
use unitsafe::catalog::{self, models, Catalog, Registry};
use unitsafe::config::Settings;
use unitsafe::format::{Formatter, Notation, Template};
use unitsafe::{Quantity, UnitError};

#[derive(Parser)]
#[command(name = "unitsafe")]
#[command(about = "Dimension-checked quantities with catalog-driven unit display", long_about = None)]
struct Cli {
    /// Settings file (default: ./unitsafe.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Environment name or path, overriding the settings file
    #[arg(long = "env", global = true)]
    environment: Option<String>,

    /// Log resolution and loading details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the environments that can be loaded
    Environments,

    /// List the units of the environment
    List {
        /// Print the units as JSON
        #[arg(long)]
        json: bool,
    },

    /// Format a quantity
    Show {
        /// Magnitude (in `unit`, or in SI base units with --dims)
        #[arg(allow_negative_numbers = true)]
        magnitude: f64,

        /// Unit identifier or symbol from the environment
        #[arg(short, long, conflicts_with = "dims")]
        unit: Option<String>,

        /// Seven comma-separated exponents (kg,m,s,A,cd,K,mol); "p/q" allowed
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        dims: Option<Vec<String>>,

        /// Display factor applied to the SI magnitude
        #[arg(short, long)]
        factor: Option<f64>,

        /// Force a prefix ("" or "unity" for none)
        #[arg(long)]
        prefix: Option<String>,

        /// Decimal places (default from settings)
        #[arg(short, long)]
        precision: Option<usize>,

        /// plain, html or latex (default from settings)
        #[arg(short, long)]
        template: Option<Template>,

        /// Scientific notation
        #[arg(short, long)]
        scientific: bool,

        /// Print the raw quantity as JSON
        #[arg(long)]
        json: bool,
    },

    /// Express a magnitude of one unit in another
    Convert {
        #[arg(allow_negative_numbers = true)]
        magnitude: f64,

        /// Unit the magnitude is given in
        from: String,

        /// Target unit (omit to list the candidates)
        to: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::discover(cli.config.as_deref())?;
    let registry = Registry::from_settings(&settings);
    debug!("search paths: {:?}", registry.search_paths());

    let environment = cli
        .environment
        .clone()
        .unwrap_or_else(|| settings.environment.clone());
    let load = || catalog::load_with(&registry, &environment);

    match cli.command {
        Commands::Environments => list_environments(&registry),
        Commands::List { json } => list_units(&*load()?, json),
        Commands::Show {
            magnitude,
            unit,
            dims,
            factor,
            prefix,
            precision,
            template,
            scientific,
            json,
        } => {
            let catalog = load()?;
            let mut quantity = build_quantity(&catalog, magnitude, unit, dims)?;
            if let Some(factor) = factor {
                quantity = quantity.with_factor(factor)?;
            }
            if let Some(prefix) = prefix {
                quantity = quantity.prefixed(&prefix)?;
            }
            quantity = quantity.with_precision(precision.unwrap_or(settings.precision));

            if json {
                println!("{}", serde_json::to_string_pretty(&quantity)?);
                return Ok(());
            }
            let mut formatter =
                Formatter::new(&catalog).template(template.unwrap_or(settings.template));
            if scientific {
                formatter = formatter.notation(Notation::Scientific);
            }
            println!("{}", formatter.format(&quantity));
            Ok(())
        }
        Commands::Convert {
            magnitude,
            from,
            to,
        } => convert(&*load()?, &settings, magnitude, &from, to.as_deref()),
    }
}

fn list_environments(registry: &Registry) -> Result<(), Box<dyn std::error::Error>> {
    let builtins = Registry::builtin_names();
    for name in registry.available() {
        if builtins.contains(&name.as_str()) {
            println!("  - {} (built-in)", name);
        } else {
            println!("  - {}", name);
        }
    }
    Ok(())
}

fn list_units(catalog: &Catalog, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let units: serde_json::Map<String, serde_json::Value> = catalog
            .units()
            .into_iter()
            .map(|(name, q)| Ok((name.to_string(), serde_json::to_value(q)?)))
            .collect::<Result<_, serde_json::Error>>()?;
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(());
    }

    if catalog.warnings().has_issues() {
        eprintln!("{}", catalog.warnings());
    }

    let formatter = Formatter::new(catalog);
    println!("Environment: {} ({} units)", catalog.name(), catalog.len());
    for entry in catalog.entries() {
        println!(
            "  - {} [{}] = {}",
            entry.name(),
            entry.symbol(),
            formatter.format(&entry.quantity().si())
        );
    }
    Ok(())
}

fn build_quantity(
    catalog: &Catalog,
    magnitude: f64,
    unit: Option<String>,
    dims: Option<Vec<String>>,
) -> Result<Quantity, UnitError> {
    match (unit, dims) {
        (Some(unit), _) => unit_quantity(catalog, magnitude, &unit),
        (None, Some(dims)) => {
            let raw = serde_json::Value::Array(
                dims.into_iter().map(serde_json::Value::String).collect(),
            );
            let dimensions = models::parse_dimensions("--dims", &raw)?;
            Quantity::new(magnitude, dimensions)
        }
        (None, None) => Err(UnitError::InvalidOperand(
            "either --unit or --dims is required".to_string(),
        )),
    }
}

fn unit_quantity(catalog: &Catalog, magnitude: f64, name: &str) -> Result<Quantity, UnitError> {
    let entry = catalog
        .find(name)
        .ok_or_else(|| UnitError::UnknownUnit(name.to_string()))?;
    Ok(magnitude * entry.quantity())
}

fn convert(
    catalog: &Catalog,
    settings: &Settings,
    magnitude: f64,
    from: &str,
    to: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let quantity = unit_quantity(catalog, magnitude, from)?.with_precision(settings.precision);
    let formatter = Formatter::new(catalog).template(settings.template);

    match to {
        Some(target) => {
            let converted = quantity.convert_to(catalog, target)?;
            println!("{}", formatter.format(&converted));
        }
        None => {
            println!("{} can be converted to:", formatter.format(&quantity));
            for entry in quantity.conversion_targets(catalog) {
                println!("  - {} [{}]", entry.name(), entry.symbol());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<(), Box<dyn std::error::Error>> {
        run(Cli::try_parse_from(args)?)
    }

    #[test]
    fn test_commands_load_the_environment() {
        assert!(run_args(&["unitsafe", "--env", "structural", "list"]).is_ok());
        assert!(run_args(&["unitsafe", "--env", "structural", "list", "--json"]).is_ok());
        assert!(run_args(&["unitsafe", "--env", "structural", "convert", "10", "ft", "inch"]).is_ok());
        assert!(run_args(&["unitsafe", "--env", "structural", "convert", "10", "ft"]).is_ok());
        assert!(run_args(&["unitsafe", "--env", "structural", "convert", "10", "ft", "lb"]).is_err());
        assert!(run_args(&["unitsafe", "--env", "no-such-environment", "list"]).is_err());
    }
}
