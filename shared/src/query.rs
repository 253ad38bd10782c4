//! Search and summary helpers used by list views

use serde::{Deserialize, Serialize};

use crate::models::{AssetStatus, Device, User};

/// Case-insensitive match of `term` against name, tag and holder.
///
/// An empty term matches everything.
pub fn device_matches(device: &Device, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    device.name.to_lowercase().contains(&term)
        || device.tag_id.to_lowercase().contains(&term)
        || device
            .assigned_to
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(&term))
}

/// Filter devices by search term and, optionally, exact type
pub fn search_devices<'a, I>(devices: I, term: &str, kind: Option<&str>) -> Vec<&'a Device>
where
    I: IntoIterator<Item = &'a Device>,
{
    devices
        .into_iter()
        .filter(|d| device_matches(d, term))
        .filter(|d| kind.is_none_or(|k| d.kind == k))
        .collect()
}

/// Case-insensitive match on name or employee ID
pub fn user_matches(user: &User, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty()
        || user.name.to_lowercase().contains(&term)
        || user.employee_id.to_lowercase().contains(&term)
}

pub fn search_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    users.iter().filter(|u| user_matches(u, term)).collect()
}

/// Find a user by exact employee ID, falling back to case-insensitive name
pub fn find_user<'a>(users: &'a [User], query: &str) -> Option<&'a User> {
    let query = query.trim();
    users
        .iter()
        .find(|u| u.employee_id == query)
        .or_else(|| {
            let lower = query.to_lowercase();
            users.iter().find(|u| u.name.to_lowercase() == lower)
        })
}

/// Dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStats {
    pub total: usize,
    pub available: usize,
    pub assigned: usize,
    pub pending: usize,
    pub repair: usize,
}

impl DeviceStats {
    pub fn collect<'a, I>(devices: I) -> Self
    where
        I: IntoIterator<Item = &'a Device>,
    {
        devices.into_iter().fold(Self::default(), |mut s, d| {
            s.total += 1;
            match d.status {
                AssetStatus::Available => s.available += 1,
                AssetStatus::Assigned => s.assigned += 1,
                AssetStatus::Pending => s.pending += 1,
                AssetStatus::Repair => s.repair += 1,
            }
            s
        })
    }
}
