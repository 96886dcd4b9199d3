//! End-to-end tests: platform wire events through the driver into the
//! coordinator, asserting on what the collaborator doubles recorded.

use std::rc::Rc;

use serde_json::json;

use hearth_core::{EventKind, HomeKind, ShellConfig, ShellEvent};
use hearth_shell::test_utils::{record_events, test_app, FakeFocus, FakeLauncher, FakeRegistry};
use hearth_shell::{
    AppRegistry, FocusManager, HomeCoordinator, Launcher, Scheduler, ShellDriver,
};

const PRIMARY_MANIFEST: &str = "app://home.local/manifest.webapp";
const LANDING_MANIFEST: &str = "app://landing.local/manifest.webapp";

struct Shell {
    driver: ShellDriver,
    primary: Rc<FakeLauncher>,
    landing: Rc<FakeLauncher>,
    registry: Rc<FakeRegistry>,
    focus: Rc<FakeFocus>,
    coordinator: Rc<HomeCoordinator>,
}

fn boot_shell() -> Shell {
    let driver = ShellDriver::new();
    let primary = FakeLauncher::new(PRIMARY_MANIFEST, "home-1");
    let landing = FakeLauncher::new(LANDING_MANIFEST, "landing-1");
    let registry = FakeRegistry::new();
    let focus = FakeFocus::new();
    let coordinator = HomeCoordinator::new(
        Rc::clone(&primary) as Rc<dyn Launcher>,
        Rc::clone(&landing) as Rc<dyn Launcher>,
        Rc::clone(&registry) as Rc<dyn AppRegistry>,
        Rc::clone(&focus) as Rc<dyn FocusManager>,
        driver.bus(),
        driver.scheduler() as Rc<dyn Scheduler>,
        ShellConfig::default(),
    );
    coordinator.attach();
    primary.make_ready();
    landing.make_ready();
    Shell {
        driver,
        primary,
        landing,
        registry,
        focus,
        coordinator,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_wire_events_drive_an_underlay_round_trip() {
    let shell = boot_shell();
    shell.landing.set_alternate_content(true);

    let video = test_app("app://video.local/manifest.webapp", "video-1");
    shell.registry.set_foreground(Some(video.clone()));

    let uncovered = record_events(&shell.driver.bus(), EventKind::HomeUncovered);

    let sender = shell.driver.sender();
    let wire: &[(&str, serde_json::Value)] = &[
        ("primary-ready", json!(null)),
        ("landing-ready", json!(null)),
        ("home-surface-opened", json!({ "kind": "landing" })),
        // An ordinary app opens; the active home closes underneath it.
        (
            "app-opened",
            json!({ "manifest": "app://video.local/manifest.webapp" }),
        ),
        // Hardware home: open the primary home over the running app.
        ("home-requested", json!(null)),
        // Home dismissed again while the app still sits on top.
        ("home-surface-closed", json!(null)),
        // A name outside the set is delivered to nobody.
        ("wallpaper-changed", json!({ "path": "/x" })),
    ];
    for (name, params) in wire {
        sender.send(ShellEvent::parse(name, params.clone())).unwrap();
    }
    drop(sender);
    shell.driver.run().await;

    // Landing was closed by the app open, primary was opened over the app,
    // and the dismissal handed the app back with focus.
    assert_eq!(shell.landing.surface_ref().close_count(), 1);
    assert_eq!(shell.primary.surface_ref().opened.get(), 1);
    assert_eq!(uncovered.borrow().len(), 1);
    assert_eq!(shell.focus.focused.get(), 1);
    assert_eq!(video.close_count(), 0);
    assert_eq!(shell.coordinator.active_home(), Some(HomeKind::Primary));
}

#[tokio::test(flavor = "current_thread")]
async fn test_search_open_closes_home_on_the_following_turn() {
    let shell = boot_shell();
    shell.landing.set_alternate_content(true);

    let sender = shell.driver.sender();
    for (name, params) in [
        ("primary-ready", json!(null)),
        ("landing-ready", json!(null)),
        ("home-surface-opened", json!({ "kind": "landing" })),
        (
            "app-opened",
            json!({
                "manifest": "app://search.local/manifest.webapp",
                "role": "search"
            }),
        ),
    ] {
        sender.send(ShellEvent::parse(name, params)).unwrap();
    }
    drop(sender);
    shell.driver.run().await;

    // The deferred close ran on the turn after the search app opened.
    assert_eq!(shell.landing.surface_ref().close_count(), 1);
    assert!(shell.landing.surface_ref().is_hidden());
    assert_eq!(shell.coordinator.active_home(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn test_activity_counting_survives_the_wire() {
    let shell = boot_shell();

    let sender = shell.driver.sender();
    for name in [
        "primary-ready",
        "landing-ready",
        "activity-opened",
        "activity-opened",
        "activity-closed",
    ] {
        sender.send(ShellEvent::parse(name, json!(null))).unwrap();
    }
    drop(sender);
    shell.driver.run().await;

    assert_eq!(shell.coordinator.activity_count(), 1);
}
