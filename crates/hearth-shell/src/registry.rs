//! App registry and focus collaborator traits

use std::fmt;
use std::rc::Rc;

use hearth_core::{AppDescriptor, AppIdentity, CloseMode, InstanceId, ManifestId};

/// A non-home app window as seen by the coordinator.
///
/// App-like windows report their own identity; ordinary windows derive it
/// from the manifest. The coordinator only compares identities, it never
/// cares which scheme produced them.
pub trait AppWindow: fmt::Debug {
    fn manifest_id(&self) -> ManifestId;

    fn identity(&self) -> AppIdentity;

    fn instance_id(&self) -> InstanceId;

    /// True when this window is itself a home surface.
    fn is_home_surface(&self) -> bool;

    fn close(&self, mode: CloseMode);

    /// Plain-data description for outbound events.
    fn descriptor(&self) -> AppDescriptor {
        AppDescriptor {
            manifest: self.manifest_id(),
            identity: self.identity(),
            instance: self.instance_id(),
        }
    }
}

/// The process/app registry reporting what is currently foregrounded.
pub trait AppRegistry {
    /// The currently foregrounded app window, if any.
    fn foreground_app(&self) -> Option<Rc<dyn AppWindow>>;

    /// Bring an existing window to the foreground.
    fn display(&self, app: &Rc<dyn AppWindow>);
}

/// The platform focus manager.
pub trait FocusManager {
    /// Transfer input focus to whatever window is on top.
    fn focus(&self);
}
