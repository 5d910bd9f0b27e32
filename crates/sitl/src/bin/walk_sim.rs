//! Run one measurement against a simulated walk.
//!
//! Usage:
//!   cargo run -p tire_torture_sitl --bin walk_sim -- [OPTIONS]
//!
//! Options:
//!   --mode <MODE>        distance, rotation or angled (default: distance)
//!   --seconds <S>        Walk duration before stopping (default: 10)
//!   --speed <M/S>        Walking speed, overrides the scenario
//!   --roll <RAD>         Phone roll, overrides the scenario
//!   --scenario <FILE>    JSON walk scenario
//!   --param <NAME=VALUE> Override a measurement parameter (repeatable)

use std::env;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use tire_torture::core::logging;
use tire_torture::{log_error, log_info, DisplayUpdate, MeasurementService};
use tire_torture_core::parameters::{ParamValue, ParameterError, ParameterStore};
use tire_torture_core::{Command, MeasurementMode, MeasurementParams};
use tire_torture_sitl::{SimulatedWalk, WalkConfig};
use tokio::sync::mpsc;

struct Args {
    mode: MeasurementMode,
    seconds: f64,
    speed: Option<f64>,
    roll: Option<f64>,
    scenario: Option<String>,
    params: Vec<(String, f64)>,
}

fn parse_args() -> Args {
    let mut args = Args {
        mode: MeasurementMode::Distance,
        seconds: 10.0,
        speed: None,
        roll: None,
        scenario: None,
        params: Vec::new(),
    };

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--mode" => {
                i += 1;
                args.mode = match arg_value(&raw, i, "mode") {
                    "distance" => MeasurementMode::Distance,
                    "rotation" => MeasurementMode::Rotation,
                    "angled" => MeasurementMode::AngledWalk,
                    other => {
                        eprintln!("Error: unknown mode {other}");
                        process::exit(1);
                    }
                };
            }
            "--seconds" => {
                i += 1;
                args.seconds = parse_f64_arg(&raw, i, "seconds");
            }
            "--speed" => {
                i += 1;
                args.speed = Some(parse_f64_arg(&raw, i, "speed"));
            }
            "--roll" => {
                i += 1;
                args.roll = Some(parse_f64_arg(&raw, i, "roll"));
            }
            "--scenario" => {
                i += 1;
                args.scenario = Some(arg_value(&raw, i, "scenario").to_string());
            }
            "--param" => {
                i += 1;
                args.params.push(parse_param_arg(&raw, i));
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !(args.seconds >= 0.0) {
        eprintln!("Error: seconds must be non-negative");
        process::exit(1);
    }

    args
}

fn arg_value<'a>(raw: &'a [String], i: usize, name: &str) -> &'a str {
    raw.get(i).map(String::as_str).unwrap_or_else(|| {
        eprintln!("Error: --{name} requires a value");
        process::exit(1);
    })
}

fn parse_f64_arg(raw: &[String], i: usize, name: &str) -> f64 {
    arg_value(raw, i, name).parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for --{name}");
        process::exit(1);
    })
}

fn parse_param_arg(raw: &[String], i: usize) -> (String, f64) {
    let value = arg_value(raw, i, "param");
    let parsed = value
        .split_once('=')
        .and_then(|(name, v)| Some((name.to_string(), v.parse().ok()?)));
    parsed.unwrap_or_else(|| {
        eprintln!("Error: --param expects NAME=VALUE, got {value}");
        process::exit(1);
    })
}

fn print_usage() {
    eprintln!(
        "Usage: walk_sim [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --mode <MODE>      distance, rotation or angled (default: distance)\n\
         \x20 --seconds <S>      Walk duration before stopping (default: 10)\n\
         \x20 --speed <M/S>      Walking speed, overrides the scenario\n\
         \x20 --roll <RAD>       Phone roll, overrides the scenario\n\
         \x20 --scenario <FILE>  JSON walk scenario\n\
         \x20 --param <N=V>      Override a measurement parameter (repeatable)\n\
         \x20 -h, --help         Show this help"
    );
}

fn load_config(args: &Args) -> WalkConfig {
    let mut config = match &args.scenario {
        Some(path) => WalkConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {path}: {e}");
            process::exit(1);
        }),
        None => WalkConfig::default(),
    };
    if let Some(speed) = args.speed {
        config.speed_mps = speed;
    }
    if let Some(roll) = args.roll {
        config.roll_rad = roll;
    }
    config
}

/// Build measurement parameters from the store defaults plus overrides.
fn load_params(args: &Args, config: &WalkConfig) -> MeasurementParams {
    let mut store = ParameterStore::new();
    let mut apply = || -> Result<(), ParameterError> {
        MeasurementParams::register_defaults(&mut store)?;
        store.set("ORI_SPEED", ParamValue::Int(config.sensor_speed().as_param()))?;
        for (name, value) in &args.params {
            let value = match store.get(name) {
                Some(ParamValue::Int(_)) => ParamValue::Int(*value as i32),
                _ => ParamValue::Float(*value),
            };
            store.set(name, value)?;
        }
        Ok(())
    };
    if let Err(e) = apply() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let params = MeasurementParams::from_store(&store);
    for (name, value) in store.iter() {
        log_info!("param {name} = {value:?}");
    }
    params
}

fn report(update: &DisplayUpdate) {
    for text in [
        &update.status,
        &update.start_location,
        &update.end_location,
        &update.distance,
        &update.rotations,
    ]
    .into_iter()
    .flatten()
    {
        log_info!("[{}] {}", update.mode, text);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();
    let args = parse_args();
    let config = load_config(&args);

    let walk = SimulatedWalk::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    log_info!("{:?}", walk);

    let params = load_params(&args, walk.config());
    let interval_ms = params.sensor_speed.interval_ms();
    let service = MeasurementService::new(params, Arc::new(walk.location_provider()));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let sensor = tokio::spawn({
        let service = service.clone();
        let sensor = walk.orientation_sensor();
        async move { service.run_sensor(sensor, tx).await }
    });
    let printer = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            report(&update);
        }
    });

    // Let the first orientation sample land before gating an angled walk
    tokio::time::sleep(Duration::from_millis(2 * interval_ms)).await;

    let Some(start) = Command::start(args.mode) else {
        process::exit(1);
    };
    match service.handle_command(start).await {
        Ok(update) => report(&update),
        Err(e) => {
            log_error!("{start} failed: {e}");
            sensor.abort();
            process::exit(1);
        }
    }

    tokio::time::sleep(Duration::from_secs_f64(args.seconds)).await;

    if service.mode() == args.mode {
        if let Some(stop) = Command::stop(args.mode) {
            match service.handle_command(stop).await {
                Ok(update) => report(&update),
                Err(e) => log_error!("{stop} failed: {e}"),
            }
        }
    } else {
        log_info!("{} already ended", args.mode);
    }

    log_info!(
        "walked {:.2} m, {} location requests",
        walk.distance_walked(),
        walk.request_count()
    );

    sensor.abort();
    let _ = printer.await;
}
