//! # hearth-shell - Home-Surface Coordination
//!
//! This crate implements the coordination state machine that decides which
//! of the two home surfaces (Primary or Landing) is visible atop the app
//! stack of a single-foreground-app device shell, which background app is
//! remembered as an underlay to restore later, and how launch requests that
//! target a home surface are intercepted.
//!
//! The coordinator is driven entirely by inbound [`hearth_core::ShellEvent`]s
//! delivered through the [`ShellBus`]; collaborators are injected trait
//! objects so hosts and tests substitute their own:
//!
//! - [`Launcher`] / [`Surface`] -- the two home surface handles
//! - [`AppRegistry`] / [`AppWindow`] -- what is currently foregrounded
//! - [`FocusManager`] -- input focus transfer
//! - [`Scheduler`] -- deferred work on a later loop turn
//!
//! [`ShellDriver`] hosts the bus and scheduler on a current-thread tokio
//! loop; [`test_utils`] provides recording fakes for all collaborator seams.

pub mod bus;
pub mod coordinator;
pub mod driver;
pub mod launcher;
pub mod registry;
pub mod schedule;
pub mod state;
pub mod test_utils;

// Re-export primary types
pub use bus::{Dispatch, ShellBus, SubscriptionId};
pub use coordinator::HomeCoordinator;
pub use driver::{EventSender, ShellDriver};
pub use launcher::{Launcher, Surface};
pub use registry::{AppRegistry, AppWindow, FocusManager};
pub use schedule::{DeferredTask, Scheduler, TickScheduler};
pub use state::CoordinatorState;

// Re-export core types commonly used alongside the coordinator
pub use hearth_core::{EventKind, HomeKind, ShellConfig, ShellEvent};
