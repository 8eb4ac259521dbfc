//! Single-cabin elevator simulator.
//!
//! [`elevator::Elevator`] owns the cabin state behind one lock and moves it on a driver thread.
//! Presentation code talks to it through the [`elevator::CabinControl`],
//! [`elevator::FloorControl`] and [`elevator::DispatcherControl`] views.

pub mod config;
pub mod console;
pub mod elevator;
pub mod shared;
