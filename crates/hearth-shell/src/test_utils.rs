//! Test utilities for coordinator collaborators
//!
//! Hand-rolled fakes that record every command the coordinator issues, so
//! tests can assert on visibility, open/close traffic, focus transfers, and
//! underlay handling without any real windowing underneath.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use hearth_core::{AppIdentity, CloseMode, EventKind, InstanceId, ManifestId, ShellEvent};

use crate::bus::{Dispatch, ShellBus};
use crate::launcher::{Launcher, Surface};
use crate::registry::{AppRegistry, AppWindow, FocusManager};

/// Recording surface double. Visibility starts unset so tests can tell
/// "never touched" apart from "explicitly hidden".
pub struct FakeSurface {
    instance: InstanceId,
    ready: Cell<bool>,
    visible: Cell<Option<bool>>,
    pub ensured: Cell<u32>,
    pub opened: Cell<u32>,
    pub closed: RefCell<Vec<CloseMode>>,
    pub fade_overlay_shown: Cell<u32>,
    pub fade_overlay_hidden: Cell<u32>,
    pub faded_out: Cell<u32>,
    pending_ready: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl FakeSurface {
    pub fn new(instance: &str) -> Rc<Self> {
        Rc::new(Self {
            instance: InstanceId::from(instance),
            ready: Cell::new(false),
            visible: Cell::new(None),
            ensured: Cell::new(0),
            opened: Cell::new(0),
            closed: RefCell::new(Vec::new()),
            fade_overlay_shown: Cell::new(0),
            fade_overlay_hidden: Cell::new(0),
            faded_out: Cell::new(0),
            pending_ready: RefCell::new(Vec::new()),
        })
    }

    /// Flip to ready and run any callbacks parked on `when_ready`.
    pub fn make_ready(&self) {
        self.ready.set(true);
        let pending: Vec<Box<dyn FnOnce()>> = self.pending_ready.borrow_mut().drain(..).collect();
        for callback in pending {
            callback();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get() == Some(true)
    }

    /// True when `set_visible(false)` was the last visibility command.
    pub fn is_hidden(&self) -> bool {
        self.visible.get() == Some(false)
    }

    pub fn close_count(&self) -> usize {
        self.closed.borrow().len()
    }
}

impl Surface for FakeSurface {
    fn ensure(&self, _force: bool) {
        self.ensured.set(self.ensured.get() + 1);
    }

    fn set_visible(&self, visible: bool) {
        self.visible.set(Some(visible));
    }

    fn show_fade_overlay(&self) {
        self.fade_overlay_shown.set(self.fade_overlay_shown.get() + 1);
    }

    fn hide_fade_overlay(&self) {
        self.fade_overlay_hidden.set(self.fade_overlay_hidden.get() + 1);
    }

    fn fade_out(&self) {
        self.faded_out.set(self.faded_out.get() + 1);
    }

    fn open(&self) {
        self.opened.set(self.opened.get() + 1);
        self.visible.set(Some(true));
    }

    fn close(&self, mode: CloseMode) {
        self.closed.borrow_mut().push(mode);
        self.visible.set(Some(false));
    }

    fn instance_id(&self) -> InstanceId {
        self.instance.clone()
    }

    fn when_ready(&self, callback: Box<dyn FnOnce()>) {
        if self.ready.get() {
            callback();
        } else {
            self.pending_ready.borrow_mut().push(callback);
        }
    }
}

/// Launcher double wrapping one [`FakeSurface`].
pub struct FakeLauncher {
    manifest: ManifestId,
    ready: Cell<bool>,
    alternate: Cell<bool>,
    surface: Rc<FakeSurface>,
}

impl FakeLauncher {
    pub fn new(manifest: &str, instance: &str) -> Rc<Self> {
        Rc::new(Self {
            manifest: ManifestId::from(manifest),
            ready: Cell::new(false),
            alternate: Cell::new(false),
            surface: FakeSurface::new(instance),
        })
    }

    /// Mark the launcher and its surface ready.
    pub fn make_ready(&self) {
        self.ready.set(true);
        self.surface.make_ready();
    }

    pub fn set_alternate_content(&self, alternate: bool) {
        self.alternate.set(alternate);
    }

    pub fn surface_ref(&self) -> &Rc<FakeSurface> {
        &self.surface
    }
}

impl Launcher for FakeLauncher {
    fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn has_alternate_content(&self) -> bool {
        self.alternate.get()
    }

    fn manifest_id(&self) -> ManifestId {
        self.manifest.clone()
    }

    fn surface(&self, _force_create: bool) -> Rc<dyn Surface> {
        Rc::clone(&self.surface) as Rc<dyn Surface>
    }
}

/// App window double.
#[derive(Debug)]
pub struct FakeApp {
    manifest: ManifestId,
    identity: AppIdentity,
    instance: InstanceId,
    is_home: bool,
    pub closed: RefCell<Vec<CloseMode>>,
}

impl FakeApp {
    pub fn close_count(&self) -> usize {
        self.closed.borrow().len()
    }
}

impl AppWindow for FakeApp {
    fn manifest_id(&self) -> ManifestId {
        self.manifest.clone()
    }

    fn identity(&self) -> AppIdentity {
        self.identity.clone()
    }

    fn instance_id(&self) -> InstanceId {
        self.instance.clone()
    }

    fn is_home_surface(&self) -> bool {
        self.is_home
    }

    fn close(&self, mode: CloseMode) {
        self.closed.borrow_mut().push(mode);
    }
}

/// Creates an ordinary (non-home) test app; identity derives from the
/// manifest like a regular window.
pub fn test_app(manifest: &str, instance: &str) -> Rc<FakeApp> {
    Rc::new(FakeApp {
        manifest: ManifestId::from(manifest),
        identity: AppIdentity::from(manifest),
        instance: InstanceId::from(instance),
        is_home: false,
        closed: RefCell::new(Vec::new()),
    })
}

/// Creates a test app that reports itself as a home surface.
pub fn test_home_app(manifest: &str, instance: &str) -> Rc<FakeApp> {
    Rc::new(FakeApp {
        manifest: ManifestId::from(manifest),
        identity: AppIdentity::from(manifest),
        instance: InstanceId::from(instance),
        is_home: true,
        closed: RefCell::new(Vec::new()),
    })
}

/// Registry double reporting a settable foreground app.
#[derive(Default)]
pub struct FakeRegistry {
    foreground: RefCell<Option<Rc<dyn AppWindow>>>,
    pub displayed: RefCell<Vec<AppIdentity>>,
}

impl FakeRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_foreground(&self, app: Option<Rc<dyn AppWindow>>) {
        *self.foreground.borrow_mut() = app;
    }
}

impl AppRegistry for FakeRegistry {
    fn foreground_app(&self) -> Option<Rc<dyn AppWindow>> {
        self.foreground.borrow().clone()
    }

    fn display(&self, app: &Rc<dyn AppWindow>) {
        self.displayed.borrow_mut().push(app.identity());
    }
}

/// Focus manager double counting transfers.
#[derive(Default)]
pub struct FakeFocus {
    pub focused: Cell<u32>,
}

impl FakeFocus {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

impl FocusManager for FakeFocus {
    fn focus(&self) {
        self.focused.set(self.focused.get() + 1);
    }
}

/// Collect every event of `kind` published on the bus.
pub fn record_events(bus: &ShellBus, kind: EventKind) -> Rc<RefCell<Vec<ShellEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    bus.subscribe(kind, move |event| {
        sink.borrow_mut().push(event.clone());
        Dispatch::Continue
    });
    log
}
