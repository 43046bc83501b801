//! Display consumer seam
//!
//! The core never renders. Hosts attach a [`DisplayBridge`] to receive each
//! generation as a single-channel byte buffer and project it however they
//! like — sprite texture update, mesh material, terminal dump.

use std::sync::{Arc, Mutex};

use crate::grid::Grid;

/// Consumer of finished generations.
///
/// Called with the merged seed frame at configure time and with every
/// generation produced by a readback thereafter.
pub trait DisplayBridge: Send {
    fn present(&mut self, frame: &Grid);
}

impl<F: FnMut(&Grid) + Send> DisplayBridge for F {
    fn present(&mut self, frame: &Grid) {
        self(frame)
    }
}

/// Shared slot holding the most recent frame, for hosts that poll from a
/// render loop instead of reacting to pushes.
#[derive(Clone, Default)]
pub struct LatestFrame {
    slot: Arc<Mutex<Option<Grid>>>,
}

impl LatestFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bridge that overwrites this slot on every presented frame.
    pub fn bridge(&self) -> Box<dyn DisplayBridge> {
        let slot = Arc::clone(&self.slot);
        Box::new(move |frame: &Grid| {
            *slot.lock().unwrap() = Some(frame.clone());
        })
    }

    /// The most recently presented frame, if any.
    pub fn get(&self) -> Option<Grid> {
        self.slot.lock().unwrap().clone()
    }
}
