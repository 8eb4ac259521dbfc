use crate::config::ElevatorConfig;
use crate::shared::{Behaviour, Direction, ElevatorEvent, ElevatorSnapshot, FloorButton, RequestSource};
use crossbeam_channel as cbc;
use log::{debug, info, trace};
use std::collections::BTreeSet;

/**
 * Complete mutable state of one elevator cabin, plus every decision routine that reads it.
 *
 * Nothing in here sleeps or locks. The controller keeps one instance behind a mutex and the
 * driver thread calls `drive`, `on_tick` and `on_doors_closed` on it between suspensions.
 *
 * # Fields
 * - `min_floor`, `max_floor`:      Serviceable range, fixed at construction.
 * - `current_floor`:               Continuous cabin position, clamped to the range.
 * - `direction`:                   Committed direction of travel, `None` while idle.
 * - `is_power_on`:                 Cabin ignores requests and movement while off.
 * - `door_open_at_floor`:          Floor the doors are dwelling open at.
 * - `floors_pressed_in_cabin`:     Pending cabin-panel requests.
 * - `floors_called`:               Pending floor-panel calls.
 * - `floor_step`:                  Position delta per tick.
 * - `stop_tolerance`:              Distance at which the cabin counts as arrived.
 * - `subscribers`:                 Event listeners, pruned when disconnected.
 */
#[derive(Debug, Clone)]
pub struct ElevatorState {
    min_floor: i32,
    max_floor: i32,
    current_floor: f64,
    direction: Option<Direction>,
    is_power_on: bool,
    door_open_at_floor: Option<i32>,
    floors_pressed_in_cabin: BTreeSet<i32>,
    floors_called: BTreeSet<i32>,
    floor_step: f64,
    stop_tolerance: f64,
    subscribers: Vec<cbc::Sender<ElevatorEvent>>,
}

/// Outcome of evaluating the cabin against its pending requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    ContinueMoving,
    OpenDoors(i32),
    ProcessCalls,
}

/// What the driver has to wait for before touching the state again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    Tick,
    Dwell,
}

/// Nearest floor to `from` in `floors`, optionally restricted to floors not behind the cabin
/// when travelling in `ahead`. Equal distances resolve to the lowest floor.
pub fn nearest_floor(
    from: f64,
    floors: &BTreeSet<i32>,
    ahead: Option<Direction>,
    tolerance: f64,
) -> Option<i32> {
    floors
        .iter()
        .copied()
        .filter(|&f| match ahead {
            Some(Direction::Up) => f64::from(f) >= from - tolerance,
            Some(Direction::Down) => f64::from(f) <= from + tolerance,
            None => true,
        })
        .min_by(|a, b| distance(from, *a).total_cmp(&distance(from, *b)))
}

fn distance(from: f64, floor: i32) -> f64 {
    (f64::from(floor) - from).abs()
}

impl ElevatorState {
    pub fn new(config: &ElevatorConfig) -> ElevatorState {
        let start = config.start_floor().clamp(config.min_floor, config.max_floor);

        ElevatorState {
            min_floor: config.min_floor,
            max_floor: config.max_floor,
            current_floor: f64::from(start),
            direction: None,
            is_power_on: true,
            door_open_at_floor: None,
            floors_pressed_in_cabin: BTreeSet::new(),
            floors_called: BTreeSet::new(),
            floor_step: config.floor_step,
            stop_tolerance: config.stop_tolerance,
            subscribers: Vec::new(),
        }
    }

    /***************************************/
    /*            Observations             */
    /***************************************/
    pub fn min_floor(&self) -> i32 {
        self.min_floor
    }

    pub fn max_floor(&self) -> i32 {
        self.max_floor
    }

    pub fn current_floor(&self) -> f64 {
        self.current_floor
    }

    /// Nearest integer floor, rounding half-up.
    pub fn closest_floor(&self) -> i32 {
        (self.current_floor + 0.5).floor() as i32
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn is_power_on(&self) -> bool {
        self.is_power_on
    }

    pub fn door_open_at_floor(&self) -> Option<i32> {
        self.door_open_at_floor
    }

    pub fn floors_pressed_in_cabin(&self) -> &BTreeSet<i32> {
        &self.floors_pressed_in_cabin
    }

    pub fn floors_called(&self) -> &BTreeSet<i32> {
        &self.floors_called
    }

    pub fn behaviour(&self) -> Behaviour {
        if self.door_open_at_floor.is_some() {
            Behaviour::DoorOpen
        } else if self.direction.is_some() {
            Behaviour::Moving
        } else {
            Behaviour::Idle
        }
    }

    pub fn cabin_buttons(&self) -> Vec<FloorButton> {
        self.buttons(&self.floors_pressed_in_cabin)
    }

    pub fn floor_buttons(&self) -> Vec<FloorButton> {
        self.buttons(&self.floors_called)
    }

    // Top floor first, the way the panels are laid out
    fn buttons(&self, pending: &BTreeSet<i32>) -> Vec<FloorButton> {
        (self.min_floor..=self.max_floor)
            .rev()
            .map(|floor| FloorButton {
                floor,
                is_pressed: pending.contains(&floor),
            })
            .collect()
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            min_floor: self.min_floor,
            max_floor: self.max_floor,
            current_floor: self.current_floor,
            closest_floor: self.closest_floor(),
            direction: self.direction,
            behaviour: self.behaviour(),
            is_power_on: self.is_power_on,
            door_open_at_floor: self.door_open_at_floor,
            cabin_requests: self.floors_pressed_in_cabin.iter().copied().collect(),
            floor_calls: self.floors_called.iter().copied().collect(),
        }
    }

    pub fn is_at_floor(&self, floor: i32) -> bool {
        distance(self.current_floor, floor) <= self.stop_tolerance
    }

    /// At `floor` and not passing through it: idle there, or dwelling with the doors open.
    pub fn is_stationed_at(&self, floor: i32) -> bool {
        self.is_at_floor(floor)
            && (self.direction.is_none() || self.door_open_at_floor == Some(floor))
    }

    /***************************************/
    /*              Requests               */
    /***************************************/

    /// Records a request from either panel. Returns `false` when the request is absorbed as a no-op.
    pub fn accept_request(&mut self, floor: i32, source: RequestSource) -> bool {
        if !self.is_power_on {
            debug!("Ignoring {:?} request for floor {}: power is off", source, floor);
            return false;
        }

        if floor < self.min_floor || floor > self.max_floor {
            debug!(
                "Ignoring {:?} request for floor {}: outside [{}, {}]",
                source, floor, self.min_floor, self.max_floor
            );
            return false;
        }

        if self.is_stationed_at(floor) {
            debug!("Ignoring {:?} request for floor {}: cabin is already there", source, floor);
            return false;
        }

        let inserted = match source {
            RequestSource::Cabin => self.floors_pressed_in_cabin.insert(floor),
            RequestSource::Floor => self.floors_called.insert(floor),
        };

        if inserted {
            self.publish(ElevatorEvent::RequestAccepted { floor, source });
        }
        inserted
    }

    /// Flips power. Switching off abandons all requests and any movement in progress.
    pub fn toggle_power(&mut self) -> bool {
        self.is_power_on = !self.is_power_on;

        if !self.is_power_on {
            self.floors_pressed_in_cabin.clear();
            self.floors_called.clear();
            self.set_direction(None);
        }

        info!("Power {}", if self.is_power_on { "on" } else { "off" });
        self.publish(ElevatorEvent::PowerChanged(self.is_power_on));
        self.is_power_on
    }

    pub fn subscribe(&mut self) -> cbc::Receiver<ElevatorEvent> {
        let (event_tx, event_rx) = cbc::unbounded::<ElevatorEvent>();
        self.subscribers.push(event_tx);
        event_rx
    }

    fn publish(&mut self, event: ElevatorEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn set_direction(&mut self, direction: Option<Direction>) {
        if self.direction != direction {
            self.direction = direction;
            self.publish(ElevatorEvent::DirectionChanged(direction));
        }
    }

    /***************************************/
    /*             Decisions               */
    /***************************************/

    /// Direction towards the nearest cabin press, else the nearest call, else `None`.
    pub fn commit_direction(&self) -> Option<Direction> {
        let target = nearest_floor(self.current_floor, &self.floors_pressed_in_cabin, None, 0.0)
            .or_else(|| nearest_floor(self.current_floor, &self.floors_called, None, 0.0))?;

        let direction = Direction::towards(self.current_floor, target);
        debug!("Committing {:?} towards floor {}", direction, target);
        Some(direction)
    }

    /// Nearest pending floor not behind the cabin when travelling in `direction`.
    /// A cabin press wins over a call at the same distance.
    pub fn nearest_ahead(&self, direction: Direction) -> Option<i32> {
        let pressed = nearest_floor(
            self.current_floor,
            &self.floors_pressed_in_cabin,
            Some(direction),
            self.stop_tolerance,
        );
        let called = nearest_floor(
            self.current_floor,
            &self.floors_called,
            Some(direction),
            self.stop_tolerance,
        );

        match (pressed, called) {
            (Some(p), Some(c)) => {
                if distance(self.current_floor, p) <= distance(self.current_floor, c) {
                    Some(p)
                } else {
                    Some(c)
                }
            }
            (p, c) => p.or(c),
        }
    }

    pub fn next_action(&self) -> Action {
        let Some(direction) = self.direction else {
            return Action::ProcessCalls;
        };

        match self.nearest_ahead(direction) {
            None => Action::ProcessCalls,
            Some(floor) if self.is_at_floor(floor) => Action::OpenDoors(floor),
            Some(_) => Action::ContinueMoving,
        }
    }

    /***************************************/
    /*             Movement                */
    /***************************************/

    /// Moves the cabin one step in its committed direction, clamped to the floor range.
    /// The step ends on the next pending floor instead of passing it.
    pub fn advance(&mut self) {
        let Some(direction) = self.direction else {
            return;
        };

        let mut next = self.current_floor + direction.sign() * self.floor_step;
        if let Some(stop) = self.nearest_ahead(direction).map(f64::from) {
            let passes = match direction {
                Direction::Up => next > stop,
                Direction::Down => next < stop,
            };
            if passes {
                next = stop;
            }
        }

        self.current_floor = next.clamp(f64::from(self.min_floor), f64::from(self.max_floor));
        trace!("Cabin at {:.2} moving {:?}", self.current_floor, direction);
    }

    /// Services `floor` and opens the doors there.
    pub fn open_doors(&mut self, floor: i32) {
        self.floors_pressed_in_cabin.remove(&floor);
        self.floors_called.remove(&floor);

        // Align with the landing; the offset is within stop tolerance
        self.current_floor = f64::from(floor);
        let door_floor = self.closest_floor();
        self.door_open_at_floor = Some(door_floor);

        info!("Doors open at floor {}", door_floor);
        self.publish(ElevatorEvent::DoorsOpened(door_floor));
    }

    pub fn close_doors(&mut self) {
        if let Some(floor) = self.door_open_at_floor.take() {
            info!("Doors closed at floor {}", floor);
            self.publish(ElevatorEvent::DoorsClosed(floor));
        }
    }

    /// Evaluates the next action and applies it, reporting what the driver should wait for.
    pub fn drive(&mut self) -> Step {
        if !self.is_power_on {
            self.set_direction(None);
            return Step::Idle;
        }

        let mut action = self.next_action();
        if action == Action::ProcessCalls {
            let committed = self.commit_direction();
            self.set_direction(committed);
            if committed.is_none() {
                return Step::Idle;
            }
            action = self.next_action();
        }

        match action {
            Action::ContinueMoving => Step::Tick,
            Action::OpenDoors(floor) => {
                self.open_doors(floor);
                Step::Dwell
            }
            Action::ProcessCalls => {
                self.set_direction(None);
                Step::Idle
            }
        }
    }

    /// Called when a tick interval has elapsed.
    pub fn on_tick(&mut self) -> Step {
        if self.is_power_on {
            self.advance();
        }
        self.drive()
    }

    /// Called when the door dwell has elapsed.
    pub fn on_doors_closed(&mut self) -> Step {
        self.close_doors();
        self.drive()
    }
}
