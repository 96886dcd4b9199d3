//! Core domain types shared across hearth crates

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two home surfaces a value refers to.
///
/// The shell carries exactly two launcher handles for its lifetime. All
/// per-surface logic is keyed by this discriminant instead of duplicating
/// code paths per concrete surface type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeKind {
    /// The regular launcher screen.
    Primary,
    /// The alternate landing screen shown first-run or by configuration.
    Landing,
}

impl HomeKind {
    /// The other home surface (Primary <-> Landing).
    pub fn other(self) -> Self {
        match self {
            HomeKind::Primary => HomeKind::Landing,
            HomeKind::Landing => HomeKind::Primary,
        }
    }

    /// Short label for logging.
    pub fn label(self) -> &'static str {
        match self {
            HomeKind::Primary => "primary",
            HomeKind::Landing => "landing",
        }
    }
}

impl fmt::Display for HomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable identifier from an app's manifest, used to match lifecycle events
/// to the surface or window they concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestId(String);

impl ManifestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManifestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ManifestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ManifestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of one concrete window instance. Two windows of the same app
/// have the same manifest identity but distinct instance identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identity used when deciding whether a remembered underlay app and the
/// currently foregrounded app are "the same app". App-like windows report
/// their own identity; ordinary windows derive it from their manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppIdentity(String);

impl AppIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppIdentity {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&ManifestId> for AppIdentity {
    fn from(id: &ManifestId) -> Self {
        Self(id.as_str().to_string())
    }
}

/// How a surface or window should be torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseMode {
    /// Skip the closing transition.
    Immediate,
    /// Regular close with whatever transition the window defines.
    #[default]
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_kind_other_round_trips() {
        assert_eq!(HomeKind::Primary.other(), HomeKind::Landing);
        assert_eq!(HomeKind::Landing.other(), HomeKind::Primary);
        assert_eq!(HomeKind::Primary.other().other(), HomeKind::Primary);
    }

    #[test]
    fn test_home_kind_labels() {
        assert_eq!(HomeKind::Primary.label(), "primary");
        assert_eq!(HomeKind::Landing.to_string(), "landing");
    }

    #[test]
    fn test_manifest_id_display_and_eq() {
        let a = ManifestId::new("app://dashboard.local/manifest.webapp");
        let b = ManifestId::from("app://dashboard.local/manifest.webapp");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "app://dashboard.local/manifest.webapp");
    }

    #[test]
    fn test_identity_from_manifest() {
        let manifest = ManifestId::new("app://video.local/manifest.webapp");
        let identity = AppIdentity::from(&manifest);
        assert_eq!(identity.as_str(), manifest.as_str());
    }

    #[test]
    fn test_manifest_id_serde_is_transparent() {
        let id = ManifestId::new("app://home.local/manifest.webapp");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"app://home.local/manifest.webapp\"");
        let back: ManifestId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_close_mode_default_is_normal() {
        assert_eq!(CloseMode::default(), CloseMode::Normal);
    }
}
