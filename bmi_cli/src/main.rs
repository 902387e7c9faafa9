use bmi_core::*;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bmi")]
#[command(about = "Body mass index calculator and tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate BMI from weight and height (default)
    Calc {
        /// Weight value, in the selected weight unit
        #[arg(long)]
        weight: Option<String>,

        /// Height value: centimeters, or whole feet in feet mode
        #[arg(long)]
        height: Option<String>,

        /// Additional inches (feet mode only, defaults to 0)
        #[arg(long)]
        inches: Option<String>,

        /// Weight unit (kg, lbs)
        #[arg(long)]
        weight_unit: Option<String>,

        /// Height unit (cm, ft)
        #[arg(long)]
        height_unit: Option<String>,

        /// Dry run - show the result without logging an event
        #[arg(long)]
        dry_run: bool,
    },

    /// Show recent calculations
    History {
        /// Window in days (defaults to the configured history window)
        #[arg(long)]
        days: Option<i64>,
    },

    /// Roll up logged calculation events to CSV
    Rollup {
        /// Clean up processed log files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

/// File layout under the data directory
struct DataPaths {
    analytics_dir: PathBuf,
    log_path: PathBuf,
    csv_path: PathBuf,
    prefs_path: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        let analytics_dir = data_dir.join("analytics");
        Self {
            log_path: analytics_dir.join("bmi_calculations.jsonl"),
            csv_path: data_dir.join("calculations.csv"),
            prefs_path: data_dir.join("prefs.json"),
            analytics_dir,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    bmi_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());

    match cli.command {
        Some(Commands::Calc {
            weight,
            height,
            inches,
            weight_unit,
            height_unit,
            dry_run,
        }) => cmd_calc(
            data_dir,
            weight,
            height,
            inches,
            weight_unit,
            height_unit,
            dry_run,
            &config,
        ),
        Some(Commands::History { days }) => cmd_history(data_dir, days, &config),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(data_dir, cleanup),
        None => {
            // Default to "calc" with interactive prompts
            cmd_calc(data_dir, None, None, None, None, None, false, &config)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_calc(
    data_dir: PathBuf,
    weight: Option<String>,
    height: Option<String>,
    inches: Option<String>,
    weight_unit: Option<String>,
    height_unit: Option<String>,
    dry_run: bool,
    config: &Config,
) -> Result<()> {
    let paths = DataPaths::new(&data_dir);
    std::fs::create_dir_all(&paths.analytics_dir)?;

    let catalog = build_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let prefs = UserPrefs::load(&paths.prefs_path)?;
    let weight_unit = resolve_weight_unit(weight_unit.as_deref(), prefs.weight_unit);
    let height_unit = resolve_height_unit(height_unit.as_deref(), prefs.height_unit);

    // Prompt for anything not passed as a flag
    let weight = match weight {
        Some(w) => w,
        None => prompt(&format!("Weight ({}): ", weight_unit.as_str()))?,
    };
    let height = match height {
        Some(h) => h,
        None => match height_unit {
            HeightUnit::Cm => prompt("Height (cm): ")?,
            HeightUnit::Ft => prompt("Height (feet): ")?,
        },
    };
    let inches = match (height_unit, inches) {
        (HeightUnit::Ft, Some(i)) => i,
        (HeightUnit::Ft, None) => prompt("Inches (blank for 0): ")?,
        (HeightUnit::Cm, _) => String::new(),
    };

    let input = CalculatorInput {
        weight,
        height,
        inches,
        weight_unit,
        height_unit,
    };

    let assessment = match evaluate(&catalog, &input)? {
        Evaluation::Valid(assessment) => assessment,
        Evaluation::Invalid(report) => {
            eprintln!("Please correct the following:");
            for error in report.errors() {
                eprintln!("  - {}", error.message);
            }
            return Err(Error::Validation("input rejected".into()));
        }
    };

    display_assessment(&assessment, config.display.show_tips);

    if dry_run {
        println!("\n[Dry run - not logging calculation]");
        return Ok(());
    }

    if config.analytics.enabled {
        let record = CalculationRecord {
            id: uuid::Uuid::new_v4(),
            recorded_at: chrono::Utc::now(),
            bmi: assessment.bmi,
            category: assessment.category,
            weight_kg: assessment.weight_kg,
            height_m: assessment.height_m,
            weight_unit,
            height_unit,
        };

        let mut sink = JsonlSink::new(&paths.log_path);
        sink.append(&record)?;

        println!("\n✓ Calculation logged");
    } else {
        tracing::debug!("Analytics disabled, not logging event");
    }

    // Remember the units for next time
    let prefs = UserPrefs {
        weight_unit,
        height_unit,
    };
    prefs.save(&paths.prefs_path)?;

    Ok(())
}

fn cmd_history(data_dir: PathBuf, days: Option<i64>, config: &Config) -> Result<()> {
    let paths = DataPaths::new(&data_dir);
    let days = days.unwrap_or(config.history.window_days);

    let catalog = build_default_catalog();
    let records = load_recent_records(&paths.log_path, &paths.csv_path, days)?;

    if records.is_empty() {
        println!("No calculations in the last {} days.", days);
        return Ok(());
    }

    println!("\nCalculations from the last {} days:", days);
    println!();
    for record in &records {
        println!(
            "  {}  BMI {:>5.1}  {}",
            record.recorded_at.format("%Y-%m-%d %H:%M"),
            record.bmi,
            category_label(&catalog, record.category),
        );
    }

    println!();
    let counts = category_counts(&records);
    for category in BmiCategory::ALL {
        if let Some(count) = counts.get(&category) {
            println!("  {}: {}", category_label(&catalog, category), count);
        }
    }

    Ok(())
}

fn cmd_rollup(data_dir: PathBuf, cleanup: bool) -> Result<()> {
    let paths = DataPaths::new(&data_dir);

    if !paths.log_path.exists() {
        println!("No event log found - nothing to roll up.");
        return Ok(());
    }

    let count = bmi_core::csv_rollup::log_to_csv_and_archive(&paths.log_path, &paths.csv_path)?;

    println!("✓ Rolled up {} calculations to CSV", count);
    println!("  CSV: {}", paths.csv_path.display());

    if cleanup {
        let cleaned = bmi_core::csv_rollup::cleanup_processed_logs(&paths.analytics_dir)?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed log files", cleaned);
        }
    }

    Ok(())
}

fn display_assessment(assessment: &BmiAssessment, show_tips: bool) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BMI RESULT");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  BMI: {:.1}", assessment.bmi);
    println!("  Category: {}", assessment.profile.label);
    println!();
    println!("  {}", assessment.profile.description);
    println!("  {}", assessment.profile.health_range);

    if show_tips && !assessment.profile.tips.is_empty() {
        println!();
        for tip in &assessment.profile.tips {
            println!("  → {}", tip);
        }
    }

    println!();
}

fn category_label(catalog: &Catalog, category: BmiCategory) -> String {
    catalog
        .profile(category)
        .map(|p| p.label.clone())
        .unwrap_or_else(|| category.as_str().to_string())
}

fn resolve_weight_unit(flag: Option<&str>, fallback: WeightUnit) -> WeightUnit {
    match flag {
        Some(s) => WeightUnit::parse(s).unwrap_or_else(|| {
            eprintln!("Unknown weight unit: {}. Using {}.", s, fallback.as_str());
            fallback
        }),
        None => fallback,
    }
}

fn resolve_height_unit(flag: Option<&str>, fallback: HeightUnit) -> HeightUnit {
    match flag {
        Some(s) => HeightUnit::parse(s).unwrap_or_else(|| {
            eprintln!("Unknown height unit: {}. Using {}.", s, fallback.as_str());
            fallback
        }),
        None => fallback,
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}
