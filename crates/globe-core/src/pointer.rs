//! Gesture-derived pointer shared between the frame path and status readers.
//!
//! One `PointerWriter` exists per cell and is owned by the gesture pipeline.
//! Readers are cheap to clone and always observe a whole `PointerState`.

use crate::constants::POINTER_CENTER;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            x: POINTER_CENTER[0],
            y: POINTER_CENTER[1],
            active: false,
        }
    }
}

/// Create a cell holding the centered, inactive default.
pub fn pointer_cell() -> (PointerWriter, PointerReader) {
    let shared = Arc::new(Mutex::new(PointerState::default()));
    (
        PointerWriter {
            shared: Arc::clone(&shared),
        },
        PointerReader { shared },
    )
}

fn lock(shared: &Mutex<PointerState>) -> MutexGuard<'_, PointerState> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sole writer. Not `Clone`.
pub struct PointerWriter {
    shared: Arc<Mutex<PointerState>>,
}

impl PointerWriter {
    pub fn publish(&mut self, state: PointerState) {
        *lock(&self.shared) = state;
    }

    pub fn current(&self) -> PointerState {
        *lock(&self.shared)
    }

    pub fn reader(&self) -> PointerReader {
        PointerReader {
            shared: Arc::clone(&self.shared),
        }
    }
}

#[derive(Clone)]
pub struct PointerReader {
    shared: Arc<Mutex<PointerState>>,
}

impl PointerReader {
    pub fn snapshot(&self) -> PointerState {
        *lock(&self.shared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_centered_and_inactive() {
        let (_w, r) = pointer_cell();
        assert_eq!(
            r.snapshot(),
            PointerState {
                x: 0.5,
                y: 0.5,
                active: false
            }
        );
    }

    #[test]
    fn readers_see_published_value() {
        let (mut w, r) = pointer_cell();
        let r2 = w.reader();
        let next = PointerState {
            x: 0.1,
            y: 0.9,
            active: true,
        };
        w.publish(next);
        assert_eq!(r.snapshot(), next);
        assert_eq!(r2.snapshot(), next);
    }

    #[test]
    fn readers_work_across_threads() {
        let (mut w, r) = pointer_cell();
        w.publish(PointerState {
            x: 0.2,
            y: 0.3,
            active: true,
        });
        let seen = std::thread::spawn(move || r.snapshot()).join().unwrap();
        assert!(seen.active);
    }
}
