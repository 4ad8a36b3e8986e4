//! Shared "a gesture is active" flag.
//!
//! The parent view creates one [`DragSignal`] and hands clones to the drag
//! and resize controllers and the snap detector. A controller raises the
//! flag by acquiring an [`ActiveGesture`]; the flag drops back when the guard
//! is dropped, whichever way the gesture ends.

use std::cell::Cell;
use std::rc::Rc;

use super::error::InteractionError;

#[derive(Debug, Clone, Default)]
pub struct DragSignal {
    active: Rc<Cell<bool>>,
}

impl DragSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Raise the flag for the lifetime of the returned guard.
    ///
    /// Only one gesture may hold the flag at a time.
    pub fn acquire(&self) -> Result<ActiveGesture, InteractionError> {
        if self.active.get() {
            return Err(InteractionError::GestureInProgress);
        }
        self.active.set(true);
        Ok(ActiveGesture {
            active: Rc::clone(&self.active),
        })
    }
}

/// Holds the shared flag raised; lowers it on drop.
#[derive(Debug)]
#[must_use = "the gesture ends as soon as the guard is dropped"]
pub struct ActiveGesture {
    active: Rc<Cell<bool>>,
}

impl Drop for ActiveGesture {
    fn drop(&mut self) {
        self.active.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_raises_and_lowers_flag() {
        let signal = DragSignal::new();
        let observer = signal.clone();
        assert!(!observer.is_active());

        let guard = signal.acquire().unwrap();
        assert!(observer.is_active());

        drop(guard);
        assert!(!observer.is_active());
    }

    #[test]
    fn test_second_acquire_is_refused() {
        let signal = DragSignal::new();
        let _guard = signal.acquire().unwrap();
        assert_eq!(
            signal.clone().acquire().unwrap_err(),
            InteractionError::GestureInProgress
        );
    }

    #[test]
    fn test_flag_lowered_on_unwind() {
        let signal = DragSignal::new();
        let inner = signal.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = inner.acquire().unwrap();
            panic!("host view torn down mid-gesture");
        }));
        assert!(result.is_err());
        assert!(!signal.is_active());
    }
}
