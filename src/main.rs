/* 3rd party libraries */
use clap::Parser;
use log::{info, warn};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread::Builder;

/* Custom libraries */
use elevator_sim::config::Config;
use elevator_sim::console::{Command, HELP};
use elevator_sim::elevator::{CabinControl, DispatcherControl, Elevator, FloorControl};
use elevator_sim::shared::ElevatorEvent;
use elevator_sim::unwrap_or_exit;

/// Single-cabin elevator simulator driven from the console
#[derive(Parser, Debug)]
#[clap(name = "elevator-sim", version, about)]
struct Args {
    /// Path to the TOML configuration, built-in defaults are used when it does not exist
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the lowest floor
    #[clap(long, allow_hyphen_values = true)]
    min_floor: Option<i32>,

    /// Override the highest floor
    #[clap(long, allow_hyphen_values = true)]
    max_floor: Option<i32>,

    /// Override the floor the cabin starts at
    #[clap(long, allow_hyphen_values = true)]
    initial_floor: Option<i32>,
}

fn load_config(args: &Args) -> Config {
    let mut config = if args.config.exists() {
        unwrap_or_exit!(Config::load(&args.config), "loading configuration")
    } else {
        warn!("{} not found, using defaults", args.config.display());
        Config::default()
    };

    if let Some(min_floor) = args.min_floor {
        config.elevator.min_floor = min_floor;
    }
    if let Some(max_floor) = args.max_floor {
        config.elevator.max_floor = max_floor;
    }
    if args.initial_floor.is_some() {
        config.elevator.initial_floor = args.initial_floor;
    }

    unwrap_or_exit!(config.validate(), "validating configuration");
    config
}

fn log_event(event: ElevatorEvent) {
    match event {
        ElevatorEvent::RequestAccepted { floor, source } => {
            info!("{:?} request for floor {}", source, floor)
        }
        ElevatorEvent::DirectionChanged(Some(direction)) => info!("Heading {:?}", direction),
        ElevatorEvent::DirectionChanged(None) => info!("Idle"),
        ElevatorEvent::DoorsOpened(floor) => info!("Doors opened at floor {}", floor),
        ElevatorEvent::DoorsClosed(floor) => info!("Doors closed at floor {}", floor),
        ElevatorEvent::PowerChanged(on) => info!("Power {}", if on { "on" } else { "off" }),
    }
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args);

    // Start the elevator
    let elevator = unwrap_or_exit!(Elevator::new(&config.elevator), "starting elevator");
    info!(
        "Elevator serving floors {} to {}, parked at {}",
        DispatcherControl::min_floor(&elevator),
        DispatcherControl::max_floor(&elevator),
        DispatcherControl::closest_floor(&elevator)
    );

    // Report events as they happen
    let events = elevator.subscribe();
    let event_thread = Builder::new().name("event_logger".into());
    let event_thread = unwrap_or_exit!(
        event_thread.spawn(move || {
            for event in events.iter() {
                log_event(event);
            }
        }),
        "starting event logger"
    );

    println!("{}", HELP);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read from stdin: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::PressCabin(floor)) => {
                if !elevator.press_floor_in_cabin(floor) {
                    println!("cabin request for floor {} ignored", floor);
                }
            }
            Ok(Command::Call(floor)) => {
                if !elevator.call_on_floor(floor) {
                    println!("call from floor {} ignored", floor);
                }
            }
            Ok(Command::TogglePower) => {
                DispatcherControl::toggle_power(&elevator);
            }
            Ok(Command::EmergencyStop) => {
                if !CabinControl::emergency_stop(&elevator) {
                    println!("power is already off");
                }
            }
            Ok(Command::Status) => match serde_json::to_string_pretty(&elevator.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => warn!("Failed to serialize status: {}", e),
            },
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::Quit) => break,
            Err(e) => println!("{}", e),
        }
    }

    // Dropping the elevator stops the driver and closes the event stream
    drop(elevator);
    let _ = event_thread.join();
}
