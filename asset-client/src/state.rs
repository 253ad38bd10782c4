//! Application state container
//!
//! Owned by [`crate::AssetClient`], which is its only writer. Views read it
//! through shared references.

use shared::models::{Device, HistoryEntry, Snapshot, User};
use shared::query::DeviceStats;
use shared::visibility::{self, Actor};

/// Read failure banner title
pub const READ_ERROR_TITLE: &str = "Lỗi kết nối";
/// Write failure banner title
pub const WRITE_ERROR_TITLE: &str = "Lỗi cập nhật";

/// User-visible error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub details: Option<String>,
    /// Connectivity problem; a retry may help
    pub network: bool,
}

impl Banner {
    pub fn read(details: impl Into<String>) -> Self {
        Self {
            message: READ_ERROR_TITLE.to_string(),
            details: Some(details.into()),
            network: true,
        }
    }

    pub fn write(details: impl Into<String>) -> Self {
        Self {
            message: WRITE_ERROR_TITLE.to_string(),
            details: Some(details.into()),
            network: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub(crate) snapshot: Snapshot,
    pub(crate) current_user: Option<User>,
    pub(crate) banner: Option<Banner>,
    pub(crate) is_loading: bool,
    pub(crate) is_saving: bool,
}

impl AppState {
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn devices(&self) -> &[Device] {
        &self.snapshot.devices
    }

    pub fn users(&self) -> &[User] {
        &self.snapshot.users
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.snapshot.history
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn actor(&self) -> Option<Actor> {
        self.current_user.as_ref().map(Actor::from)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn visible_devices(&self) -> Vec<&Device> {
        visibility::visible_devices(self.actor().as_ref(), &self.snapshot.devices)
    }

    pub fn visible_history(&self) -> Vec<&HistoryEntry> {
        visibility::visible_history(
            self.actor().as_ref(),
            &self.snapshot.devices,
            &self.snapshot.history,
        )
    }

    /// Counters over what the current actor can see
    pub fn stats(&self) -> DeviceStats {
        DeviceStats::collect(self.visible_devices())
    }

    /// Swap in a device with the same tag, returning the one it replaced
    pub(crate) fn replace_device(&mut self, device: Device) -> Option<Device> {
        let slot = self
            .snapshot
            .devices
            .iter_mut()
            .find(|d| d.tag_id == device.tag_id)?;
        Some(std::mem::replace(slot, device))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Normalizer, RawRecord};

    #[test]
    fn test_replace_device_returns_previous() {
        let mut state = AppState::default();
        state.snapshot.devices = Normalizer::new()
            .with_now("now")
            .devices(&[RawRecord::new().with("tagid", "A").with("name", "Old")]);

        let mut updated = state.snapshot.devices[0].clone();
        updated.name = "New".into();
        let previous = state.replace_device(updated).unwrap();

        assert_eq!(previous.name, "Old");
        assert_eq!(state.devices()[0].name, "New");

        let mut stranger = previous.clone();
        stranger.tag_id = "Z".into();
        assert!(state.replace_device(stranger).is_none());
    }

    #[test]
    fn test_nobody_identified_sees_nothing() {
        let mut state = AppState::default();
        state.snapshot.devices = Normalizer::new()
            .with_now("now")
            .devices(&[RawRecord::new().with("tagid", "A")]);
        assert!(state.visible_devices().is_empty());
        assert_eq!(state.stats().total, 0);
    }
}
