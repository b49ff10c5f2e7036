use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use ballistic_tables::{
    range_table, trajectory_table, DragModel, RangeConfig, TrajectoryConfig, TrajectoryTable,
    UnitSystem,
};

#[derive(Parser)]
#[command(name = "ballistics")]
#[command(version)]
#[command(about = "Range estimation and trajectory tables for custom rifle configurations", long_about = None)]
struct Cli {
    /// Log derived values (muzzle velocity, zero angle) to stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plot a range estimation table from known target sizes
    Range {
        /// Unit system used to format distances
        #[arg(short = 'u', long, default_value = "imperial")]
        unit: UnitSystem,

        /// Mils between rows
        #[arg(short = 's', long, default_value = "1")]
        step: u32,

        /// Largest mil value
        #[arg(short = 'r', long, default_value = "30")]
        range: u32,

        /// Output format
        #[arg(short = 'o', long, default_value = "tsv")]
        output: OutputFormat,

        /// Known target sizes, e.g. 18in, 6ft, 1.8m
        #[arg(required = true)]
        sizes: Vec<String>,
    },

    /// Plot a ballistics table for a rifle and cartridge
    Trajectory {
        /// JSON file with trajectory settings; flags override it
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Unit system for inputs and table columns
        #[arg(short = 'u', long)]
        unit: Option<UnitSystem>,

        /// Bullet caliber (in | mm)
        #[arg(long)]
        caliber: Option<f64>,

        /// Bullet weight (gr | g)
        #[arg(long)]
        weight: Option<f64>,

        /// Cartridge pressure (psi | MPa)
        #[arg(long)]
        pressure: Option<f64>,

        /// Barrel length (in | cm)
        #[arg(long)]
        barrel_length: Option<f64>,

        /// Zero distance (yd | m); 0 for a flat launch
        #[arg(short = 'z', long)]
        zero_distance: Option<f64>,

        /// Drag model
        #[arg(long)]
        drag_model: Option<DragModel>,

        /// Drag coefficient for the quadratic model
        #[arg(long)]
        drag_coefficient: Option<f64>,

        /// Distance between rows (yd | m)
        #[arg(short = 's', long)]
        step: Option<u32>,

        /// Largest distance (yd | m)
        #[arg(short = 'r', long)]
        range: Option<u32>,

        /// Output format
        #[arg(short = 'o', long, default_value = "tsv")]
        output: OutputFormat,
    },

    /// Display unit profiles and drag models
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Tsv,
    Csv,
    Json,
    Table,
}

impl OutputFormat {
    fn delimiter(self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            _ => b'\t',
        }
    }
}

#[derive(Debug, Serialize)]
struct RangeOutput<'a> {
    unit: UnitSystem,
    targets: &'a [String],
    rows: Vec<ballistic_tables::RangeRow>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Range { unit, step, range, output, sizes } => {
            let config = RangeConfig { unit, step, range };
            let profile = config.profile();
            let lengths = sizes
                .iter()
                .map(|s| profile.parse_length(s))
                .collect::<Result<Vec<_>, _>>()?;

            let rows = range_table(&config, &lengths)?;

            match output {
                OutputFormat::Json => {
                    let out = RangeOutput { unit: config.unit, targets: &sizes, rows };
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                OutputFormat::Table => {
                    println!("╔════════════════════════════════════════╗");
                    println!("║       RANGE ESTIMATION ({:<8})       ║", config.unit.to_string());
                    println!("╚════════════════════════════════════════╝");
                    print!("{:>6}", "mil");
                    for size in &sizes {
                        print!(" │ {size:>10}");
                    }
                    println!();
                    for row in &rows {
                        print!("{:>6}", row.mil);
                        for d in &row.distances {
                            print!(" │ {:>10}", profile.format_length(*d));
                        }
                        println!();
                    }
                }
                OutputFormat::Tsv | OutputFormat::Csv => {
                    let mut out = csv::WriterBuilder::new()
                        .delimiter(output.delimiter())
                        .from_writer(io::stdout());
                    let mut header = vec!["mil".to_string()];
                    header.extend(sizes.iter().cloned());
                    out.write_record(&header)?;
                    for row in &rows {
                        let mut record = vec![row.mil.to_string()];
                        record.extend(row.distances.iter().map(|d| profile.format_length(*d)));
                        out.write_record(&record)?;
                    }
                    out.flush()?;
                }
            }
        }

        Commands::Trajectory {
            config,
            unit,
            caliber,
            weight,
            pressure,
            barrel_length,
            zero_distance,
            drag_model,
            drag_coefficient,
            step,
            range,
            output,
        } => {
            let mut settings = match config {
                Some(path) => TrajectoryConfig::from_json_file(&path)?,
                None => TrajectoryConfig::default(),
            };

            // flags override the file
            if let Some(unit) = unit {
                settings.unit = unit;
            }
            if caliber.is_some() {
                settings.bullet_caliber = caliber;
            }
            if weight.is_some() {
                settings.bullet_weight = weight;
            }
            if pressure.is_some() {
                settings.cartridge_pressure = pressure;
            }
            if barrel_length.is_some() {
                settings.barrel_length = barrel_length;
            }
            if let Some(zero_distance) = zero_distance {
                settings.zero_distance = zero_distance;
            }
            if let Some(drag_model) = drag_model {
                settings.drag_model = drag_model;
            }
            if let Some(drag_coefficient) = drag_coefficient {
                settings.drag_coefficient = drag_coefficient;
            }
            if let Some(step) = step {
                settings.step = step;
            }
            if let Some(range) = range {
                settings.range = range;
            }

            let table = trajectory_table(&settings)?;
            display_trajectory(&table, output)?;
        }

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      BALLISTIC TABLES v{:<8}        ║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            for system in [UnitSystem::Imperial, UnitSystem::Si] {
                let p = system.profile();
                println!("║ {:<38} ║", format!("{system}"));
                println!("║   {:<36} ║", format!("caliber {} {}", p.default_caliber, p.caliber_label));
                println!("║   {:<36} ║", format!("weight {:.2} {}", p.default_weight, p.weight_label));
                println!("║   {:<36} ║", format!("pressure {} {}", p.default_pressure, p.pressure_label));
                println!("║   {:<36} ║", format!("barrel {} {}", p.default_barrel_length, p.barrel_label));
                println!("║   {:<36} ║", format!("columns: {}", p.trajectory_headers[0]));
            }
            println!("╠════════════════════════════════════════╣");
            println!("║ Drag models: none, quadratic, g1, g7   ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn display_trajectory(table: &TrajectoryTable, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(table)?);
        }

        OutputFormat::Tsv | OutputFormat::Csv => {
            let mut out = csv::WriterBuilder::new()
                .delimiter(format.delimiter())
                .from_writer(io::stdout());
            out.write_record(table.headers)?;
            for row in &table.rows {
                out.write_record(&[
                    row.distance.to_string(),
                    format!("{:.2}", row.time),
                    format!("{:.2}", row.drop),
                    format!("{:.2}", row.velocity),
                    format!("{:.2}", row.energy),
                ])?;
            }
            out.flush()?;
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Muzzle Velocity:   {:>10.2}          ║", table.muzzle_velocity);
            println!("║ Launch Angle:      {:>10.3} deg      ║", table.launch_angle.to_degrees());
            println!("║ Rows:              {:>10}          ║", table.rows.len());
            println!("╚════════════════════════════════════════╝");

            println!("┌──────────┬──────────┬──────────┬──────────┬──────────┐");
            println!(
                "│ {:>8} │ {:>8} │ {:>8} │ {:>8} │ {:>8} │",
                truncate(table.headers[0]),
                truncate(table.headers[1]),
                truncate(table.headers[2]),
                truncate(table.headers[3]),
                truncate(table.headers[4]),
            );
            println!("├──────────┼──────────┼──────────┼──────────┼──────────┤");
            for row in &table.rows {
                println!(
                    "│ {:>8} │ {:>8.3} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
                    row.distance, row.time, row.drop, row.velocity, row.energy
                );
            }
            println!("└──────────┴──────────┴──────────┴──────────┴──────────┘");
        }
    }

    Ok(())
}

/// Column headers are cut to the width of a table cell.
fn truncate(header: &str) -> &str {
    match header.char_indices().nth(8) {
        Some((idx, _)) => &header[..idx],
        None => header,
    }
}
