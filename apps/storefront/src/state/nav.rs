//! # Navigation State
//!
//! Holds the drill-down position for the current session.

use std::sync::{Arc, Mutex, PoisonError};

use petpoint_core::navigation::{NavIntent, NavigationState};

/// Session-wide navigation state.
///
/// Every transition runs the pure reducer under the lock, so two intents
/// dispatched together are applied one after the other, never interleaved.
#[derive(Debug, Clone, Default)]
pub struct NavState {
    state: Arc<Mutex<NavigationState>>,
}

impl NavState {
    /// Starts at the home screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position.
    pub fn snapshot(&self) -> NavigationState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `intent` and returns `(before, after)`.
    pub fn dispatch(&self, intent: NavIntent) -> (NavigationState, NavigationState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let before = *state;
        *state = before.apply(intent);
        (before, *state)
    }

    /// Back to the home screen, as on sign-out.
    pub fn reset(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = NavigationState::home();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petpoint_core::navigation::Screen;
    use petpoint_core::types::{Animal, Category};

    #[test]
    fn test_dispatch_reports_both_states() {
        let nav = NavState::new();
        let (before, after) = nav.dispatch(NavIntent::GoCategory {
            animal: Animal::Dogs,
        });

        assert_eq!(before, NavigationState::home());
        assert_eq!(after.screen, Screen::Category);
        assert_eq!(nav.snapshot(), after);
    }

    #[test]
    fn test_clones_share_state() {
        let nav = NavState::new();
        let shared = nav.clone();

        shared.dispatch(NavIntent::GoProducts {
            animal: Animal::Dogs,
            category: Category::Clean,
        });
        assert_eq!(nav.snapshot().screen, Screen::Products);

        nav.reset();
        assert_eq!(shared.snapshot(), NavigationState::home());
    }

    #[test]
    fn test_concurrent_dispatch_stays_consistent() {
        let nav = NavState::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let nav = nav.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let animal = Animal::ALL[i % Animal::ALL.len()];
                        nav.dispatch(NavIntent::GoCategory { animal });
                        nav.dispatch(NavIntent::GoProducts {
                            animal,
                            category: Category::Food,
                        });
                        nav.dispatch(NavIntent::Back);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(nav.snapshot().is_consistent());
    }
}
