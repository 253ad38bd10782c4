//! What an actor is allowed to see
//!
//! Management roles see everything. Everyone else sees the devices held
//! under their name or employee ID, plus history rows for those devices or
//! naming them as target. The target clause keeps return events visible
//! after the device has left the actor's hands.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{Device, HistoryEntry, User, UserRole};

/// The identified user on whose behalf data is shown and written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub name: String,
    pub employee_id: String,
    pub role: UserRole,
}

impl Actor {
    pub fn new(name: impl Into<String>, employee_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            name: name.into(),
            employee_id: employee_id.into(),
            role,
        }
    }

    /// Whether `value` names this actor by either identifier
    pub fn is_named(&self, value: &str) -> bool {
        value == self.name || value == self.employee_id
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.name.clone(), user.employee_id.clone(), user.role)
    }
}

/// Devices visible to `actor`; nothing when nobody is identified
pub fn visible_devices<'a>(actor: Option<&Actor>, devices: &'a [Device]) -> Vec<&'a Device> {
    let Some(actor) = actor else {
        return Vec::new();
    };
    if actor.role.is_management() {
        return devices.iter().collect();
    }
    devices
        .iter()
        .filter(|d| d.is_assigned_to(&actor.name, &actor.employee_id))
        .collect()
}

/// History rows visible to `actor`
pub fn visible_history<'a>(
    actor: Option<&Actor>,
    devices: &[Device],
    history: &'a [HistoryEntry],
) -> Vec<&'a HistoryEntry> {
    let Some(actor) = actor else {
        return Vec::new();
    };
    if actor.role.is_management() {
        return history.iter().collect();
    }
    let mine: HashSet<&str> = visible_devices(Some(actor), devices)
        .into_iter()
        .map(|d| d.tag_id.as_str())
        .collect();
    history
        .iter()
        .filter(|h| mine.contains(h.tag_id.as_str()) || actor.is_named(&h.target))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetStatus, HistoryAction};

    fn device(tag: &str, assigned_to: Option<&str>) -> Device {
        Device {
            id: format!("dev-{tag}"),
            tag_id: tag.into(),
            name: tag.into(),
            kind: "Laptop".into(),
            location: "HN".into(),
            configuration: String::new(),
            accessory: String::new(),
            note: String::new(),
            status: if assigned_to.is_some() {
                AssetStatus::Assigned
            } else {
                AssetStatus::Available
            },
            assigned_to: assigned_to.map(str::to_string),
            last_updated: String::new(),
        }
    }

    fn entry(id: &str, tag: &str, target: &str) -> HistoryEntry {
        HistoryEntry {
            id: id.into(),
            tag_id: tag.into(),
            device_name: tag.into(),
            action: HistoryAction::Update,
            raw_action: String::new(),
            timestamp: String::new(),
            performer: "Admin".into(),
            target: target.into(),
        }
    }

    fn fixture() -> Vec<Device> {
        vec![
            device("A", Some("An")),
            device("B", Some("NV-01")),
            device("C", Some("Bình")),
            device("D", None),
        ]
    }

    #[test]
    fn test_staff_sees_by_name_or_employee_id() {
        let devices = fixture();
        let staff = Actor::new("An", "NV-01", UserRole::Staff);
        let visible: Vec<_> = visible_devices(Some(&staff), &devices)
            .iter()
            .map(|d| d.tag_id.as_str())
            .collect();
        assert_eq!(visible, vec!["A", "B"]);
        // strict subset: C belongs to someone else
        assert!(visible.len() < devices.len());
        for d in visible_devices(Some(&staff), &devices) {
            let holder = d.assigned_to.as_deref().unwrap();
            assert!(holder == "An" || holder == "NV-01");
        }
    }

    #[test]
    fn test_management_sees_everything() {
        let devices = fixture();
        for role in [UserRole::Admin, UserRole::Operation] {
            let actor = Actor::new("Boss", "NV-99", role);
            assert_eq!(visible_devices(Some(&actor), &devices).len(), devices.len());
        }
    }

    #[test]
    fn test_nobody_sees_nothing() {
        let devices = fixture();
        assert!(visible_devices(None, &devices).is_empty());
        assert!(visible_history(None, &devices, &[entry("h", "A", "")]).is_empty());
    }

    #[test]
    fn test_history_includes_returned_devices_by_target() {
        let devices = fixture();
        let history = vec![
            entry("h1", "A", ""),
            entry("h2", "X", "An"),
            entry("h3", "Y", "NV-01"),
            entry("h4", "C", "Bình"),
        ];
        let staff = Actor::new("An", "NV-01", UserRole::Staff);
        let ids: Vec<_> = visible_history(Some(&staff), &devices, &history)
            .iter()
            .map(|h| h.id.as_str())
            .collect();
        assert_eq!(ids, vec!["h1", "h2", "h3"]);
    }
}
