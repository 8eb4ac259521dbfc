pub mod controller;
pub mod driver;
pub mod state;
pub mod views;


pub use controller::{Elevator, ElevatorError};
pub use driver::ElevatorDriver;
pub use state::{Action, ElevatorState, Step};
pub use views::{CabinControl, DispatcherControl, FloorControl};
