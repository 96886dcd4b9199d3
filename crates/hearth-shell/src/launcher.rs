//! Launcher and surface collaborator traits
//!
//! A launcher is the externally-owned handle for one home surface; the
//! coordinator holds two of them (Primary and Landing) for its lifetime and
//! never creates or destroys them. The surface behind a launcher is the
//! window object the coordinator commands but does not render.
//!
//! Surface operations are idempotent by contract: closing an already-closed
//! surface or hiding an already-hidden one is a no-op on the implementor's
//! side, so the coordinator never tracks "did I already close this".

use std::rc::Rc;

use hearth_core::{CloseMode, InstanceId, ManifestId};

/// One home surface's window, commanded through a narrow interface.
pub trait Surface {
    /// Force the underlying window to exist (create it if torn down).
    fn ensure(&self, force: bool);

    /// Show or hide the surface.
    fn set_visible(&self, visible: bool);

    /// Show the fade overlay (keeps the wallpaper correct during swaps).
    fn show_fade_overlay(&self);

    /// Hide the fade overlay.
    fn hide_fade_overlay(&self);

    /// Start the fade-out transition.
    fn fade_out(&self);

    /// Open the surface as the foreground window.
    fn open(&self);

    /// Close the surface.
    fn close(&self, mode: CloseMode);

    /// Identity of this concrete window instance.
    fn instance_id(&self) -> InstanceId;

    /// Run `callback` once the surface is ready; immediately if it already
    /// is. Readiness is a precondition handled here, never an error.
    fn when_ready(&self, callback: Box<dyn FnOnce()>);
}

/// Externally-owned handle for one home surface.
pub trait Launcher {
    /// True once the surface is instantiated and usable.
    fn is_ready(&self) -> bool;

    /// True when an alternate landing experience is configured. Only
    /// meaningful on the Landing handle; Primary returns false.
    fn has_alternate_content(&self) -> bool;

    /// Manifest identity used to match launch events to this surface.
    fn manifest_id(&self) -> ManifestId;

    /// The surface behind this launcher, creating it when `force_create`.
    fn surface(&self, force_create: bool) -> Rc<dyn Surface>;
}
