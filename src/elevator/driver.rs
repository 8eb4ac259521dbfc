use crate::elevator::state::{ElevatorState, Step};
use crossbeam_channel as cbc;
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/**
 * # Elevator Driver
 * The single persistent loop that moves the cabin.
 *
 * Each pass locks the shared state, lets it decide and apply the next action, unlocks, and then
 * suspends for whatever that action requires: one movement tick, one door dwell, or an idle wait
 * until a request wakes it. The lock is never held while suspended, so every wake re-reads state
 * that callers may have changed in the meantime.
 *
 * # Fields
 *
 * - `state`:           Shared elevator state, also held by the controller.
 * - `tick_interval`:   Time between two movement ticks.
 * - `door_open_time`:  Time the doors dwell open after a stop.
 * - `wake_rx`:         Signalled by the controller when a request arrives at an idle cabin.
 * - `terminate_rx`:    Signalled by the controller when it is dropped.
 */
pub struct ElevatorDriver {
    state: Arc<Mutex<ElevatorState>>,
    tick_interval: Duration,
    door_open_time: Duration,
    wake_rx: cbc::Receiver<()>,
    terminate_rx: cbc::Receiver<()>,
}

impl ElevatorDriver {
    pub fn new(
        state: Arc<Mutex<ElevatorState>>,
        tick_interval: Duration,
        door_open_time: Duration,
        wake_rx: cbc::Receiver<()>,
        terminate_rx: cbc::Receiver<()>,
    ) -> ElevatorDriver {
        ElevatorDriver {
            state,
            tick_interval,
            door_open_time,
            wake_rx,
            terminate_rx,
        }
    }

    pub fn run(self) {
        let mut step = self.state.lock().drive();

        loop {
            step = match step {
                Step::Idle => {
                    let woken = cbc::select! {
                        recv(self.wake_rx) -> msg => msg.is_ok(),
                        recv(self.terminate_rx) -> _ => false,
                    };
                    if !woken {
                        break;
                    }
                    self.state.lock().drive()
                }
                Step::Tick => {
                    if !self.suspend(self.tick_interval) {
                        break;
                    }
                    self.state.lock().on_tick()
                }
                Step::Dwell => {
                    if !self.suspend(self.door_open_time) {
                        break;
                    }
                    self.state.lock().on_doors_closed()
                }
            };
        }

        debug!("Elevator driver stopped");
    }

    // Returns false when the driver should shut down instead of continuing
    fn suspend(&self, duration: Duration) -> bool {
        cbc::select! {
            recv(self.terminate_rx) -> _ => false,
            default(duration) => true,
        }
    }
}
