//! Timer-driven simulation loop
//!
//! The tick cadence, the Idle/Armed/Steady state machine, and the
//! configure/advance protocol over the GPU session.

mod engine;
mod timer;

pub use engine::{LifeSimulation, LoopState};
pub use timer::TickTimer;
