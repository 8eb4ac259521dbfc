/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of travel from `from` towards `to`; a target at or below `from` is `Down`.
    pub fn towards(from: f64, to: i32) -> Direction {
        if f64::from(to) > from {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// Signed unit for position arithmetic.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up => 1.0,
            Direction::Down => -1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "moving")]
    Moving,
    #[serde(rename = "doorOpen")]
    DoorOpen,
}

/// One button on a panel, as shown to a presentation layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloorButton {
    pub floor: i32,
    #[serde(rename = "isPressed")]
    pub is_pressed: bool,
}

/// Everything observable about the elevator, read atomically under one lock.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElevatorSnapshot {
    #[serde(rename = "minFloor")]
    pub min_floor: i32,
    #[serde(rename = "maxFloor")]
    pub max_floor: i32,
    #[serde(rename = "currentFloor")]
    pub current_floor: f64,
    #[serde(rename = "closestFloor")]
    pub closest_floor: i32,
    pub direction: Option<Direction>,
    pub behaviour: Behaviour,
    #[serde(rename = "isPowerOn")]
    pub is_power_on: bool,
    #[serde(rename = "doorOpenAtFloor")]
    pub door_open_at_floor: Option<i32>,
    #[serde(rename = "cabinRequests")]
    pub cabin_requests: Vec<i32>,
    #[serde(rename = "floorCalls")]
    pub floor_calls: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    #[serde(rename = "cabin")]
    Cabin,
    #[serde(rename = "floor")]
    Floor,
}

/// State changes published to subscribers of an elevator.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorEvent {
    RequestAccepted { floor: i32, source: RequestSource },
    DirectionChanged(Option<Direction>),
    DoorsOpened(i32),
    DoorsClosed(i32),
    PowerChanged(bool),
}
