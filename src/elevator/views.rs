use crate::elevator::controller::Elevator;
use crate::shared::{Direction, FloorButton};

/// What the panel inside the cabin may see and do.
pub trait CabinControl: Send + Sync {
    fn floor_buttons_pressed(&self) -> Vec<FloorButton>;
    fn floor_buttons_disabled(&self) -> bool;
    fn press_floor_in_cabin(&self, floor: i32) -> bool;
    fn emergency_stop(&self) -> bool;
}

/// What the call panels on the landings may see and do.
pub trait FloorControl: Send + Sync {
    fn floor_calls(&self) -> Vec<FloorButton>;
    fn call_buttons_disabled(&self) -> bool;
    fn stop_at_floor(&self) -> Option<i32>;
    fn call_on_floor(&self, floor: i32) -> bool;
}

/// What the dispatcher console may see and do.
pub trait DispatcherControl: Send + Sync {
    fn is_power_on(&self) -> bool;
    fn current_floor(&self) -> f64;
    fn closest_floor(&self) -> i32;
    fn min_floor(&self) -> i32;
    fn max_floor(&self) -> i32;
    fn direction(&self) -> Option<Direction>;
    fn toggle_power(&self) -> bool;
}

impl CabinControl for Elevator {
    fn floor_buttons_pressed(&self) -> Vec<FloorButton> {
        self.cabin_buttons()
    }

    fn floor_buttons_disabled(&self) -> bool {
        !Elevator::is_power_on(self)
    }

    fn press_floor_in_cabin(&self, floor: i32) -> bool {
        self.press_cabin_floor(floor)
    }

    fn emergency_stop(&self) -> bool {
        Elevator::emergency_stop(self)
    }
}

impl FloorControl for Elevator {
    fn floor_calls(&self) -> Vec<FloorButton> {
        self.floor_buttons()
    }

    fn call_buttons_disabled(&self) -> bool {
        !Elevator::is_power_on(self)
    }

    fn stop_at_floor(&self) -> Option<i32> {
        self.door_open_at_floor()
    }

    fn call_on_floor(&self, floor: i32) -> bool {
        self.call_floor(floor)
    }
}

impl DispatcherControl for Elevator {
    fn is_power_on(&self) -> bool {
        Elevator::is_power_on(self)
    }

    fn current_floor(&self) -> f64 {
        Elevator::current_floor(self)
    }

    fn closest_floor(&self) -> i32 {
        Elevator::closest_floor(self)
    }

    fn min_floor(&self) -> i32 {
        Elevator::min_floor(self)
    }

    fn max_floor(&self) -> i32 {
        Elevator::max_floor(self)
    }

    fn direction(&self) -> Option<Direction> {
        Elevator::direction(self)
    }

    fn toggle_power(&self) -> bool {
        Elevator::toggle_power(self)
    }
}
