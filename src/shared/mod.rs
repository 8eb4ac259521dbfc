pub mod macros;
pub mod structs;

pub use structs::Behaviour;
pub use structs::Direction;
pub use structs::ElevatorEvent;
pub use structs::ElevatorSnapshot;
pub use structs::FloorButton;
pub use structs::RequestSource;
