use crate::config::{ConfigError, ElevatorConfig};
use crate::elevator::driver::ElevatorDriver;
use crate::elevator::state::ElevatorState;
use crate::shared::{Behaviour, Direction, ElevatorEvent, ElevatorSnapshot, FloorButton, RequestSource};
use crossbeam_channel as cbc;
use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread::{Builder, JoinHandle};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElevatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start elevator driver: {0}")]
    Spawn(#[from] std::io::Error),
}

/**
 * Owner of one elevator's state and of the driver thread that moves it.
 *
 * Every read and every mutation goes through a single mutex around `ElevatorState`. Requests
 * return as soon as the lock is released; movement happens on the driver thread. Share the
 * controller between callers with an `Arc`.
 *
 * # Fields
 * - `state`:           Shared state, also held by the driver.
 * - `wake_tx`:         Wakes the driver when an idle cabin gets a request.
 * - `terminate_tx`:    Stops the driver on drop.
 * - `driver_thread`:   Handle joined on drop.
 */
pub struct Elevator {
    state: Arc<Mutex<ElevatorState>>,
    wake_tx: cbc::Sender<()>,
    terminate_tx: cbc::Sender<()>,
    driver_thread: Option<JoinHandle<()>>,
}

impl Elevator {
    pub fn new(config: &ElevatorConfig) -> Result<Elevator, ElevatorError> {
        config.validate()?;
        let state = Arc::new(Mutex::new(ElevatorState::new(config)));

        // A single pending wake is enough, the driver re-reads all state anyway
        let (wake_tx, wake_rx) = cbc::bounded::<()>(1);
        let (terminate_tx, terminate_rx) = cbc::bounded::<()>(1);

        let driver = ElevatorDriver::new(
            state.clone(),
            config.tick_duration(),
            config.door_open_duration(),
            wake_rx,
            terminate_rx,
        );

        let driver_thread = Builder::new()
            .name("elevator_driver".into())
            .spawn(move || driver.run())?;

        Ok(Elevator {
            state,
            wake_tx,
            terminate_tx,
            driver_thread: Some(driver_thread),
        })
    }

    /***************************************/
    /*         Mutating operations         */
    /***************************************/
    pub fn press_cabin_floor(&self, floor: i32) -> bool {
        self.submit(floor, RequestSource::Cabin)
    }

    pub fn call_floor(&self, floor: i32) -> bool {
        self.submit(floor, RequestSource::Floor)
    }

    pub fn toggle_power(&self) -> bool {
        let is_power_on = self.state.lock().toggle_power();
        self.wake();
        is_power_on
    }

    /// Cuts power if it is on. Returns whether anything changed.
    pub fn emergency_stop(&self) -> bool {
        let mut state = self.state.lock();
        if !state.is_power_on() {
            return false;
        }

        warn!("Emergency stop at {:.2}", state.current_floor());
        state.toggle_power();
        true
    }

    pub fn subscribe(&self) -> cbc::Receiver<ElevatorEvent> {
        self.state.lock().subscribe()
    }

    fn submit(&self, floor: i32, source: RequestSource) -> bool {
        {
            let mut state = self.state.lock();
            if !state.accept_request(floor, source) {
                return false;
            }

            if state.direction().is_none() {
                let committed = state.commit_direction();
                state.set_direction(committed);
            }
        }

        self.wake();
        true
    }

    fn wake(&self) {
        // Full means a wake is already pending
        let _ = self.wake_tx.try_send(());
    }

    /***************************************/
    /*             Observations            */
    /***************************************/
    pub fn min_floor(&self) -> i32 {
        self.state.lock().min_floor()
    }

    pub fn max_floor(&self) -> i32 {
        self.state.lock().max_floor()
    }

    pub fn current_floor(&self) -> f64 {
        self.state.lock().current_floor()
    }

    pub fn closest_floor(&self) -> i32 {
        self.state.lock().closest_floor()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.state.lock().direction()
    }

    pub fn is_power_on(&self) -> bool {
        self.state.lock().is_power_on()
    }

    pub fn door_open_at_floor(&self) -> Option<i32> {
        self.state.lock().door_open_at_floor()
    }

    pub fn behaviour(&self) -> Behaviour {
        self.state.lock().behaviour()
    }

    pub fn floors_pressed_in_cabin(&self) -> BTreeSet<i32> {
        self.state.lock().floors_pressed_in_cabin().clone()
    }

    pub fn floors_called(&self) -> BTreeSet<i32> {
        self.state.lock().floors_called().clone()
    }

    pub fn cabin_buttons(&self) -> Vec<FloorButton> {
        self.state.lock().cabin_buttons()
    }

    pub fn floor_buttons(&self) -> Vec<FloorButton> {
        self.state.lock().floor_buttons()
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        self.state.lock().snapshot()
    }
}

impl Drop for Elevator {
    fn drop(&mut self) {
        let _ = self.terminate_tx.try_send(());
        if let Some(handle) = self.driver_thread.take() {
            if handle.join().is_err() {
                warn!("Elevator driver thread panicked");
            } else {
                debug!("Elevator driver joined");
            }
        }
    }
}
