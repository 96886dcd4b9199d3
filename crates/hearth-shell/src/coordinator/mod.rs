//! Home-surface coordination state machine
//!
//! The coordinator decides which of the two home surfaces (Primary or
//! Landing) is visible atop the app stack, whether a background app is
//! remembered as an underlay to restore later, and how launch requests that
//! target a home surface are intercepted. It is driven entirely by inbound
//! [`ShellEvent`]s; it never polls. Collaborators (launchers, app registry,
//! focus manager, bus, scheduler) are injected at construction so hosts and
//! tests can substitute doubles.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use hearth_core::events::{AppOpened, LaunchIntent};
use hearth_core::{CloseMode, EventKind, HomeKind, ManifestId, ShellConfig, ShellEvent};

use crate::bus::{Dispatch, ShellBus, SubscriptionId};
use crate::launcher::{Launcher, Surface};
use crate::registry::{AppRegistry, FocusManager};
use crate::schedule::Scheduler;
use crate::state::CoordinatorState;


/// Inbound event kinds the coordinator subscribes to.
const SUBSCRIBED: &[EventKind] = &[
    EventKind::AppSwitching,
    EventKind::FirstRunSkipped,
    EventKind::OpenRequested,
    EventKind::AppOpened,
    EventKind::AppTerminated,
    EventKind::AppLaunched,
    EventKind::HomeSurfaceOpened,
    EventKind::HomeSurfaceClosed,
    EventKind::ActivityOpened,
    EventKind::ActivityClosed,
    EventKind::HomeRequested,
    EventKind::PrimaryReady,
    EventKind::LandingReady,
];

pub struct HomeCoordinator {
    primary: Rc<dyn Launcher>,
    landing: Rc<dyn Launcher>,
    registry: Rc<dyn AppRegistry>,
    focus: Rc<dyn FocusManager>,
    bus: Rc<ShellBus>,
    scheduler: Rc<dyn Scheduler>,
    config: ShellConfig,
    state: Rc<RefCell<CoordinatorState>>,
    ready_subs: RefCell<Vec<SubscriptionId>>,
}

impl HomeCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        primary: Rc<dyn Launcher>,
        landing: Rc<dyn Launcher>,
        registry: Rc<dyn AppRegistry>,
        focus: Rc<dyn FocusManager>,
        bus: Rc<ShellBus>,
        scheduler: Rc<dyn Scheduler>,
        config: ShellConfig,
    ) -> Rc<Self> {
        Rc::new(Self {
            primary,
            landing,
            registry,
            focus,
            bus,
            scheduler,
            config,
            state: Rc::new(RefCell::new(CoordinatorState::new())),
            ready_subs: RefCell::new(Vec::new()),
        })
    }

    /// Subscribe to the inbound event set on the bus this coordinator was
    /// constructed with. Open requests are subscribed ahead of everyone else
    /// so home-targeted launches can be intercepted before default handling.
    pub fn attach(self: &Rc<Self>) {
        for &kind in SUBSCRIBED {
            let me = Rc::downgrade(self);
            let handler = move |event: &ShellEvent| match me.upgrade() {
                Some(coordinator) => coordinator.handle_event(event),
                None => Dispatch::Continue,
            };
            let id = match kind {
                EventKind::OpenRequested => self.bus.subscribe_front(kind, handler),
                _ => self.bus.subscribe(kind, handler),
            };
            if matches!(kind, EventKind::PrimaryReady | EventKind::LandingReady) {
                self.ready_subs.borrow_mut().push(id);
            }
        }
    }

    /// Both launcher handles are ready.
    pub fn is_ready(&self) -> bool {
        self.primary.is_ready() && self.landing.is_ready()
    }

    /// Which home surface is logically current; `None` while a non-home app
    /// is foregrounded.
    pub fn active_home(&self) -> Option<HomeKind> {
        self.state.borrow().active_home
    }

    /// Number of activity surfaces stacked above the active home.
    pub fn activity_count(&self) -> u32 {
        self.state.borrow().activity_count
    }

    fn launcher(&self, kind: HomeKind) -> &Rc<dyn Launcher> {
        match kind {
            HomeKind::Primary => &self.primary,
            HomeKind::Landing => &self.landing,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Event handling
    // ─────────────────────────────────────────────────────────

    /// Consume one event. Synchronous and side-effecting; never blocks,
    /// never fails for in-set events. Out-of-set events pass through.
    pub fn handle_event(&self, event: &ShellEvent) -> Dispatch {
        match event {
            ShellEvent::AppSwitching => {
                if let Some(surface) = self.resolve_home(false) {
                    surface.show_fade_overlay();
                    surface.fade_out();
                }
            }

            ShellEvent::FirstRunSkipped => {
                self.state.borrow_mut().first_run_skipped = true;
                // Readiness may have come first; force the active home
                // visible now instead of waiting for another trigger.
                if self.is_ready() {
                    if let Some(surface) = self.resolve_home(false) {
                        surface.set_visible(true);
                    }
                }
            }

            ShellEvent::OpenRequested(intent) => {
                if intent.manifest == self.primary.manifest_id()
                    || intent.manifest == self.landing.manifest_id()
                {
                    debug!(manifest = %intent.manifest, "intercepting home launch request");
                    self.launch_home(&intent.manifest);
                    return Dispatch::Stop;
                }
            }

            ShellEvent::AppOpened(info) => self.on_app_opened(info),

            ShellEvent::AppTerminated(gone) => {
                let mut state = self.state.borrow_mut();
                let matches = state
                    .underlay_app
                    .as_ref()
                    .is_some_and(|u| u.manifest_id() == gone.manifest);
                if matches {
                    debug!(manifest = %gone.manifest, "underlay app terminated");
                    state.underlay_app = None;
                }
            }

            ShellEvent::HomeSurfaceClosed => self.on_home_surface_closed(),

            ShellEvent::AppLaunched(intent) => self.on_app_launched(intent),

            ShellEvent::HomeSurfaceOpened(opened) => {
                // Exactly one home surface stays visible; the landing side
                // only participates when an alternate experience exists.
                if opened.kind == HomeKind::Landing {
                    self.set_home_visible(HomeKind::Primary, false);
                    self.set_home_visible(HomeKind::Landing, true);
                } else if self.landing.has_alternate_content() {
                    self.set_home_visible(HomeKind::Landing, false);
                    self.set_home_visible(HomeKind::Primary, true);
                }
            }

            ShellEvent::ActivityOpened => {
                let mut state = self.state.borrow_mut();
                if state.active_home.is_some() {
                    state.activity_count += 1;
                }
            }

            ShellEvent::ActivityClosed => {
                let mut state = self.state.borrow_mut();
                if state.active_home.is_some() {
                    state.activity_count = state.activity_count.saturating_sub(1);
                }
            }

            ShellEvent::HomeRequested => self.on_home_requested(),

            ShellEvent::PrimaryReady | ShellEvent::LandingReady => self.on_launcher_ready(),

            // Outbound kinds and unknown events are not ours to handle.
            _ => {}
        }
        Dispatch::Continue
    }

    fn on_app_opened(&self, info: &AppOpened) {
        if self.config.first_run_manifest.as_ref() == Some(&info.manifest) {
            // The first-run experience never becomes the active home.
            return;
        }
        if info.is_home_surface {
            let kind = match info.home_kind {
                Some(HomeKind::Landing) => HomeKind::Landing,
                _ => HomeKind::Primary,
            };
            debug!(home = %kind, "home surface foregrounded");
            self.state.borrow_mut().active_home = Some(kind);
        } else if info.role.as_deref() == Some("search") {
            // The search surface opens seamlessly over home; give it a tick
            // to render before tearing down the surface beneath it.
            let state = Rc::clone(&self.state);
            let primary = Rc::clone(&self.primary);
            let landing = Rc::clone(&self.landing);
            self.scheduler.defer(Box::new(move || {
                close_home_now(&state, &primary, &landing);
            }));
        } else {
            self.close_home_app();
        }
    }

    fn on_home_surface_closed(&self) {
        let Some(underlay) = self.state.borrow_mut().underlay_app.take() else {
            return;
        };
        // Home was dismissed. If the underlay is still what sits on top,
        // hand it back; if something else got foregrounded meanwhile, the
        // underlay has no business staying alive behind it.
        let foreground = self.registry.foreground_app();
        let uncovered = foreground.is_some_and(|current| current.identity() == underlay.identity());
        if uncovered {
            debug!(app = %underlay.identity(), "home uncovered underlay app");
            self.bus
                .publish(ShellEvent::HomeUncovered(underlay.descriptor()));
            self.focus.focus();
        } else {
            underlay.close(CloseMode::Immediate);
        }
    }

    fn on_app_launched(&self, intent: &LaunchIntent) {
        // The launch path owns the actual close of the home surface; only
        // the bookkeeping is reset here so a later close event doesn't
        // double-process.
        let mut state = self.state.borrow_mut();
        let resumes_underlay = state
            .underlay_app
            .as_ref()
            .is_some_and(|u| u.manifest_id() == intent.manifest);
        if resumes_underlay && !intent.stay_background {
            state.active_home = None;
        }
    }

    fn on_home_requested(&self) {
        let underlay = self.state.borrow().underlay_app.clone();
        if let Some(underlay) = underlay {
            if !self.landing.has_alternate_content() {
                // Without a landing experience, home cycles between the
                // remembered app and the home surface.
                debug!(app = %underlay.identity(), "home press returns to underlay");
                self.registry.display(&underlay);
                return;
            }
        }
        self.show_home_app();
    }

    fn on_launcher_ready(&self) {
        if !self.is_ready() || self.state.borrow().announced {
            return;
        }
        self.state.borrow_mut().announced = true;

        // Readiness handling is one-shot.
        for id in self.ready_subs.borrow_mut().drain(..) {
            self.bus.unsubscribe(id);
        }

        self.bus.publish(ShellEvent::CoordinatorReady);

        let landing_first = self.landing.has_alternate_content();
        let first_home = if landing_first {
            HomeKind::Landing
        } else {
            HomeKind::Primary
        };
        debug!(home = %first_home, "launchers ready");
        let first_run_skipped = {
            let mut state = self.state.borrow_mut();
            state.active_home = Some(first_home);
            state.first_run_skipped
        };
        if first_run_skipped && landing_first {
            // The skip signal arrived before readiness; apply it now.
            self.set_home_visible(HomeKind::Primary, false);
            self.set_home_visible(HomeKind::Landing, true);
        }
    }

    // ─────────────────────────────────────────────────────────
    // Home switching
    // ─────────────────────────────────────────────────────────

    /// Resolve an intercepted launch request into the canonical
    /// "home requested" event, so one code path decides the visibility swap.
    fn launch_home(&self, target: &ManifestId) {
        if !self.landing.has_alternate_content() {
            let _ = self.resolve_home(false);
            self.bus.publish(ShellEvent::HomeRequested);
            return;
        }

        let active = self.state.borrow().active_home;
        match active {
            Some(kind) => {
                if self.launcher(kind).manifest_id() != *target {
                    // In home A, asked for home B: switch.
                    self.bus.publish(ShellEvent::HomeRequested);
                } else {
                    // Already there; just confirm the surface exists.
                    let _ = self.resolve_home(false);
                }
            }
            None if self.primary.manifest_id() == *target => {
                // In an app, asked for the primary home.
                self.bus.publish(ShellEvent::HomeRequested);
            }
            None if self.landing.manifest_id() == *target => {
                // In an app, asked for landing: start from Primary so the
                // normal toggle path produces a visible swap.
                self.state.borrow_mut().active_home = Some(HomeKind::Primary);
                self.bus.publish(ShellEvent::HomeRequested);
            }
            None => {}
        }
    }

    /// Bring the resolved home surface to the foreground, remembering the
    /// app it opens over as the underlay to restore later.
    fn show_home_app(&self) {
        let Some(home) = self.resolve_home(true) else {
            return;
        };
        let Some(origin) = self.registry.foreground_app() else {
            // Nothing foregrounded to remember; just open home.
            let home_cb = Rc::clone(&home);
            home.when_ready(Box::new(move || home_cb.open()));
            return;
        };

        if origin.instance_id() == home.instance_id() {
            // Pressing home with an activity over home resolves to the same
            // window; restoring focus is all that's needed.
            self.focus.focus();
            return;
        }

        let state = Rc::clone(&self.state);
        let home_cb = Rc::clone(&home);
        home.when_ready(Box::new(move || {
            if origin.is_home_surface() {
                // Swapping home for home: nothing to restore afterwards.
                if let Some(underlay) = state.borrow_mut().underlay_app.take() {
                    underlay.close(CloseMode::Immediate);
                }
                origin.close(CloseMode::Immediate);
                home_cb.open();
            } else {
                // Open over the running app and remember it.
                state.borrow_mut().underlay_app = Some(origin);
                home_cb.open();
            }
        }));
    }

    /// Central resolver for the active home surface.
    ///
    /// Returns `None` only while neither launcher is ready. Initializes
    /// `active_home` to Primary when unset; a home-press trigger additionally
    /// runs the swap procedure and forces the surface's existence check.
    fn resolve_home(&self, is_home_press: bool) -> Option<Rc<dyn Surface>> {
        if !self.primary.is_ready() && !self.landing.is_ready() {
            return None;
        }

        if self.landing.has_alternate_content() {
            let unset = self.state.borrow().active_home.is_none();
            if unset {
                // A non-home app is foregrounded; home means primary.
                self.state.borrow_mut().active_home = Some(HomeKind::Primary);
            } else if is_home_press {
                self.swap_on_home_press();
            }
        } else if self.state.borrow().active_home.is_none() {
            self.state.borrow_mut().active_home = Some(HomeKind::Primary);
        }

        let kind = self.state.borrow().active_home.unwrap_or(HomeKind::Primary);
        let surface = self.launcher(kind).surface(true);
        if is_home_press {
            surface.ensure(true);
        }
        Some(surface)
    }

    /// Home pressed while a home surface is already active: either clear the
    /// stacked activities, or cycle between the two home surfaces.
    fn swap_on_home_press(&self) {
        let Some(active) = self.state.borrow().active_home else {
            return;
        };
        let surface = self.launcher(active).surface(false);
        let stacked = self.state.borrow().activity_count;

        if stacked > 0 {
            debug!(count = stacked, "clearing stacked activities");
            // Tearing the surface down is what closes every activity above
            // it. Landing never survives this; primary takes over.
            surface.ensure(true);
            if active == HomeKind::Landing {
                surface.set_visible(false);
                surface.close(CloseMode::Immediate);
                self.state.borrow_mut().active_home = Some(HomeKind::Primary);
            }
            self.state.borrow_mut().activity_count = 0;
        } else {
            debug!(from = %active, to = %active.other(), "cycling home surfaces");
            surface.set_visible(false);
            surface.close(CloseMode::Immediate);
            self.state.borrow_mut().active_home = Some(active.other());
        }
    }

    /// Close the active home surface now. No-op when none is active.
    fn close_home_app(&self) {
        close_home_now(&self.state, &self.primary, &self.landing);
    }

    /// Show or hide one home surface, driving the fade overlay so the
    /// wallpaper stays correct through the swap.
    fn set_home_visible(&self, kind: HomeKind, visible: bool) {
        let surface = self.launcher(kind).surface(false);
        surface.ensure(true);
        if visible {
            surface.show_fade_overlay();
        } else {
            surface.hide_fade_overlay();
        }
        surface.set_visible(visible);
    }
}

/// Close the active home surface and clear the pointer.
///
/// Free function so the deferred search-app close can capture the pieces it
/// needs by shared reference and read whatever is active when the tick runs.
fn close_home_now(
    state: &Rc<RefCell<CoordinatorState>>,
    primary: &Rc<dyn Launcher>,
    landing: &Rc<dyn Launcher>,
) {
    let Some(active) = state.borrow().active_home else {
        return;
    };
    let launcher = match active {
        HomeKind::Primary => primary,
        HomeKind::Landing => landing,
    };
    debug!(home = %active, "closing home app");
    let surface = launcher.surface(false);
    surface.ensure(true);
    surface.set_visible(false);
    surface.close(CloseMode::Immediate);
    state.borrow_mut().active_home = None;
}
