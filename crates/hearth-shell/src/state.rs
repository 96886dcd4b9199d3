//! Coordinator state (the Model)

use std::rc::Rc;

use hearth_core::HomeKind;

use crate::registry::AppWindow;

/// Mutable state owned exclusively by the coordinator.
///
/// Invariants the coordinator maintains:
/// - at most one of {Primary, Landing} is visible at any time;
/// - `active_home` is `None` only while a non-home app is genuinely
///   foregrounded;
/// - `underlay_app`, once set, is cleared exactly once (home dismissal or
///   the app's own termination);
/// - `activity_count` never goes negative and resets to 0 on the
///   hardware-home teardown path.
#[derive(Debug, Default)]
pub struct CoordinatorState {
    /// Which home surface is logically current.
    pub active_home: Option<HomeKind>,

    /// Non-home app left running beneath a home surface opened over it.
    pub underlay_app: Option<Rc<dyn AppWindow>>,

    /// Transient activity surfaces stacked above the active home.
    pub activity_count: u32,

    /// Sticky once the first-run experience is skipped.
    pub first_run_skipped: bool,

    /// Set when both launchers first report ready; coordinator-ready is
    /// published exactly once.
    pub announced: bool,
}

impl CoordinatorState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = CoordinatorState::new();
        assert_eq!(state.active_home, None);
        assert!(state.underlay_app.is_none());
        assert_eq!(state.activity_count, 0);
        assert!(!state.first_run_skipped);
        assert!(!state.announced);
    }
}
