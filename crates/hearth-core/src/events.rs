//! Shell lifecycle event definitions
//!
//! The coordinator is driven entirely by the closed event set below. Events
//! arrive from the platform as a name plus JSON params and are mapped into
//! typed variants by [`ShellEvent::parse`]; names outside the set fall back
//! to [`ShellEvent::Unknown`] and are ignored downstream.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{AppIdentity, HomeKind, InstanceId, ManifestId};

// ─────────────────────────────────────────────────────────
// Event Payloads
// ─────────────────────────────────────────────────────────

/// An app window finished opening in the foreground.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOpened {
    pub manifest: ManifestId,
    /// True when the opened window is itself a home surface.
    #[serde(default)]
    pub is_home_surface: bool,
    /// Which home surface opened; only present when `is_home_surface`.
    #[serde(default)]
    pub home_kind: Option<HomeKind>,
    /// Declared role from the app manifest (e.g. "search").
    #[serde(default)]
    pub role: Option<String>,
}

/// An app's process was torn down.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTerminated {
    pub manifest: ManifestId,
}

/// A request to open or launch an app by manifest identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchIntent {
    pub manifest: ManifestId,
    /// The launch wants the app kept in the background.
    #[serde(default)]
    pub stay_background: bool,
}

/// One of the two home surfaces finished opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSurfaceOpened {
    pub kind: HomeKind,
}

/// Plain-data description of an app window, carried on outbound events in
/// place of a live window handle. Subscribers resolve the window through the
/// app registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    pub manifest: ManifestId,
    pub identity: AppIdentity,
    pub instance: InstanceId,
}

// ─────────────────────────────────────────────────────────
// ShellEvent
// ─────────────────────────────────────────────────────────

/// The closed set of events the coordinator consumes and emits.
///
/// `HomeRequested` is both the hardware home-button press and the canonical
/// synthetic "switch to home" request: every path that wants a home surface
/// shown funnels through this one kind, so a single handler decides the
/// visibility swap.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// App switcher engaged; the visible home fades behind it.
    AppSwitching,
    /// First-run experience was skipped (sticky, one-way).
    FirstRunSkipped,
    /// Open/launch request, delivered before default handling so home
    /// targets can be intercepted.
    OpenRequested(LaunchIntent),
    /// An app window finished opening.
    AppOpened(AppOpened),
    /// An app's process died.
    AppTerminated(AppTerminated),
    /// Generic launch notification for an already-running app.
    AppLaunched(LaunchIntent),
    /// A home surface finished opening.
    HomeSurfaceOpened(HomeSurfaceOpened),
    /// The active home surface finished closing.
    HomeSurfaceClosed,
    /// A transient activity opened above the active home.
    ActivityOpened,
    /// A transient activity closed.
    ActivityClosed,
    /// Hardware home press, or the synthetic canonical request for one.
    HomeRequested,
    /// The primary launcher finished its startup sequence.
    PrimaryReady,
    /// The landing launcher finished its startup sequence.
    LandingReady,

    // Outbound-only kinds
    /// Both launchers are ready; published exactly once.
    CoordinatorReady,
    /// Home was dismissed and uncovered the remembered underlay app.
    HomeUncovered(AppDescriptor),

    /// Fallback for event names outside the set; ignored by the coordinator.
    Unknown {
        event: String,
        params: serde_json::Value,
    },
}

/// Discriminant for [`ShellEvent`], used for bus subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AppSwitching,
    FirstRunSkipped,
    OpenRequested,
    AppOpened,
    AppTerminated,
    AppLaunched,
    HomeSurfaceOpened,
    HomeSurfaceClosed,
    ActivityOpened,
    ActivityClosed,
    HomeRequested,
    PrimaryReady,
    LandingReady,
    CoordinatorReady,
    HomeUncovered,
    Unknown,
}

impl ShellEvent {
    /// Discriminant for subscription and dispatch.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::AppSwitching => EventKind::AppSwitching,
            Self::FirstRunSkipped => EventKind::FirstRunSkipped,
            Self::OpenRequested(_) => EventKind::OpenRequested,
            Self::AppOpened(_) => EventKind::AppOpened,
            Self::AppTerminated(_) => EventKind::AppTerminated,
            Self::AppLaunched(_) => EventKind::AppLaunched,
            Self::HomeSurfaceOpened(_) => EventKind::HomeSurfaceOpened,
            Self::HomeSurfaceClosed => EventKind::HomeSurfaceClosed,
            Self::ActivityOpened => EventKind::ActivityOpened,
            Self::ActivityClosed => EventKind::ActivityClosed,
            Self::HomeRequested => EventKind::HomeRequested,
            Self::PrimaryReady => EventKind::PrimaryReady,
            Self::LandingReady => EventKind::LandingReady,
            Self::CoordinatorReady => EventKind::CoordinatorReady,
            Self::HomeUncovered(_) => EventKind::HomeUncovered,
            Self::Unknown { .. } => EventKind::Unknown,
        }
    }

    /// Short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::AppSwitching => "app-switching",
            Self::FirstRunSkipped => "first-run-skipped",
            Self::OpenRequested(_) => "open-requested",
            Self::AppOpened(_) => "app-opened",
            Self::AppTerminated(_) => "app-terminated",
            Self::AppLaunched(_) => "app-launched",
            Self::HomeSurfaceOpened(_) => "home-surface-opened",
            Self::HomeSurfaceClosed => "home-surface-closed",
            Self::ActivityOpened => "activity-opened",
            Self::ActivityClosed => "activity-closed",
            Self::HomeRequested => "home-requested",
            Self::PrimaryReady => "primary-ready",
            Self::LandingReady => "landing-ready",
            Self::CoordinatorReady => "coordinator-ready",
            Self::HomeUncovered(_) => "home-uncovered",
            Self::Unknown { .. } => "unknown",
        }
    }

    /// Parse a platform event by name.
    ///
    /// `open-app` and `webapp-launch` are two wire spellings of the same
    /// open request. Unknown names and malformed params fall back to
    /// [`ShellEvent::Unknown`] rather than erroring; the bus delivers them
    /// and nothing subscribes.
    pub fn parse(event: &str, params: serde_json::Value) -> Self {
        match event {
            "app-switching" => Self::AppSwitching,
            "first-run-skipped" => Self::FirstRunSkipped,
            "open-app" | "webapp-launch" => payload(&params)
                .map(Self::OpenRequested)
                .unwrap_or_else(|_| Self::unknown(event, params)),
            "app-opened" => payload(&params)
                .map(Self::AppOpened)
                .unwrap_or_else(|_| Self::unknown(event, params)),
            "app-terminated" => payload(&params)
                .map(Self::AppTerminated)
                .unwrap_or_else(|_| Self::unknown(event, params)),
            "app-launched" => payload(&params)
                .map(Self::AppLaunched)
                .unwrap_or_else(|_| Self::unknown(event, params)),
            "home-surface-opened" => payload(&params)
                .map(Self::HomeSurfaceOpened)
                .unwrap_or_else(|_| Self::unknown(event, params)),
            "home-surface-closed" => Self::HomeSurfaceClosed,
            "activity-opened" => Self::ActivityOpened,
            "activity-closed" => Self::ActivityClosed,
            "home-requested" => Self::HomeRequested,
            "primary-ready" => Self::PrimaryReady,
            "landing-ready" => Self::LandingReady,
            _ => Self::unknown(event, params),
        }
    }

    fn unknown(event: &str, params: serde_json::Value) -> Self {
        ShellEvent::Unknown {
            event: event.to_string(),
            params,
        }
    }
}

/// Decode an event payload, mapping serde failures into [`Error::Json`].
fn payload<T: DeserializeOwned>(params: &serde_json::Value) -> Result<T> {
    serde_json::from_value(params.clone()).map_err(Error::Json)
}
