//! Household simulator entry point — CLI wiring and batch execution.

use std::path::Path;
use std::process;

use household_sim::config::ScenarioConfig;
use household_sim::features::dataset::TrainingTable;
use household_sim::io::export::export_csv;
use household_sim::runner::run_batch;
use household_sim::sim::season::SeasonalSchedule;

/// Parsed CLI arguments.
struct CliArgs {
    config_dir: String,
    scenario_path: Option<String>,
    preset: Option<String>,
    seasonal_path: Option<String>,
    seed_override: Option<u64>,
    out: Option<String>,
    features_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
    #[cfg(feature = "api")]
    model_path: Option<String>,
}

fn print_help() {
    eprintln!("household-sim — synthetic household electricity-usage simulator");
    eprintln!();
    eprintln!("Usage: household-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config-dir <path>      Directory holding house*.json files (default: configuration)");
    eprintln!("  --seasonal <path>        Shared seasonal configuration JSON");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --out <path>             Export the batch table to CSV");
    eprintln!("  --features-out <path>    Export the model-ready training table to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start the prediction API after simulation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
        eprintln!("  --model <path>           Coefficient model JSON (required with --serve)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_dir: "configuration".to_string(),
        scenario_path: None,
        preset: None,
        seasonal_path: None,
        seed_override: None,
        out: None,
        features_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
        #[cfg(feature = "api")]
        model_path: None,
    };

    let take_value = |args: &[String], i: &mut usize, flag: &str| -> String {
        *i += 1;
        match args.get(*i) {
            Some(v) => v.clone(),
            None => {
                eprintln!("error: {flag} requires a value");
                process::exit(1);
            }
        }
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config-dir" => cli.config_dir = take_value(&args, &mut i, "--config-dir"),
            "--seasonal" => cli.seasonal_path = Some(take_value(&args, &mut i, "--seasonal")),
            "--scenario" => cli.scenario_path = Some(take_value(&args, &mut i, "--scenario")),
            "--preset" => cli.preset = Some(take_value(&args, &mut i, "--preset")),
            "--seed" => {
                let value = take_value(&args, &mut i, "--seed");
                match value.parse::<u64>() {
                    Ok(s) => cli.seed_override = Some(s),
                    Err(_) => {
                        eprintln!("error: --seed value \"{value}\" is not a valid u64");
                        process::exit(1);
                    }
                }
            }
            "--out" => cli.out = Some(take_value(&args, &mut i, "--out")),
            "--features-out" => {
                cli.features_out = Some(take_value(&args, &mut i, "--features-out"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let value = take_value(&args, &mut i, "--port");
                match value.parse::<u16>() {
                    Ok(p) => cli.port = p,
                    Err(_) => {
                        eprintln!("error: --port value \"{value}\" is not a valid u16");
                        process::exit(1);
                    }
                }
            }
            #[cfg(feature = "api")]
            "--model" => cli.model_path = Some(take_value(&args, &mut i, "--model")),
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn main() {
    init_tracing();
    let cli = parse_args();

    // Load scenario: --scenario takes priority, then --preset, then baseline
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Load the optional shared seasonal configuration
    let seasonal = match cli.seasonal_path {
        Some(ref path) => match SeasonalSchedule::from_json_file(Path::new(path)) {
            Ok(schedule) => {
                let errors = schedule.validate();
                if !errors.is_empty() {
                    for e in &errors {
                        eprintln!("{e}");
                    }
                    process::exit(1);
                }
                Some(schedule)
            }
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => None,
    };

    // Run the batch
    let result = run_batch(
        Path::new(&cli.config_dir),
        seasonal.as_ref(),
        &scenario,
    );

    println!(
        "{} rows from {} house(s), {} failed",
        result.rows.len(),
        result.houses_simulated,
        result.houses_failed
    );

    // Export CSVs if requested; an empty batch produces no files
    if result.is_empty() {
        println!("no simulation data produced, skipping exports");
    } else {
        if let Some(ref path) = cli.out {
            if let Err(e) = export_csv(&result.rows, Path::new(path)) {
                eprintln!("error: failed to write batch CSV: {e}");
                process::exit(1);
            }
            println!("batch table written to {path}");
        }
        if let Some(ref path) = cli.features_out {
            let table = TrainingTable::from_rows(&result.rows);
            if let Err(e) = table.export_csv(Path::new(path)) {
                eprintln!("error: failed to write training CSV: {e}");
                process::exit(1);
            }
            println!("training table written to {path}");
        }
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        use household_sim::api::model::LinearModel;

        let Some(ref model_path) = cli.model_path else {
            eprintln!("error: --serve requires --model <path>");
            process::exit(1);
        };
        let model = match LinearModel::from_json_file(Path::new(model_path)) {
            Ok(model) => model,
            Err(e) => {
                eprintln!("error: failed to load model: {e}");
                process::exit(1);
            }
        };

        let state = Arc::new(household_sim::api::AppState { model });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(household_sim::api::serve(state, addr));
    }
}
