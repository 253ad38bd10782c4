//! Row normalizer
//!
//! Turns loosely typed sheet rows into [`Device`], [`User`] and
//! [`HistoryEntry`]. Every function here is total: a missing or garbled
//! field becomes its documented default, never an error.

use std::collections::HashSet;

use chrono::FixedOffset;
use serde_json::Value;

use crate::models::{AssetStatus, Device, HistoryAction, HistoryEntry, Snapshot, User, UserRole};
use crate::record::RawRecord;
use crate::util;

// Lookup keys are pre-folded (lower-case, no whitespace). Canonical key
// first, then English and Vietnamese synonyms with and without diacritics.

const ID: &[&str] = &["id"];

const TAG_ID: &[&str] = &[
    "tagid", "tag_id", "tag", "assettag", "deviceid", "mãtàisản", "mataisan", "mãthiếtbị",
    "mathietbi",
];
const DEVICE_NAME: &[&str] = &["name", "devicename", "tên", "ten", "tênthiếtbị", "tenthietbi"];
const DEVICE_TYPE: &[&str] = &["type", "category", "loại", "loai", "loạithiếtbị", "loaithietbi"];
const LOCATION: &[&str] = &["location", "vịtrí", "vitri", "nơiđặt", "noidat"];
const CONFIGURATION: &[&str] = &["configuration", "config", "specs", "cấuhình", "cauhinh"];
const ACCESSORY: &[&str] = &["accessory", "accessories", "phụkiện", "phukien"];
const NOTE: &[&str] = &["note", "notes", "ghichú", "ghichu"];
const STATUS: &[&str] = &["status", "trạngthái", "trangthai"];
const ASSIGNED_TO: &[&str] = &[
    "assignedto", "assigned_to", "assignee", "username", "ngườisửdụng", "nguoisudung",
    "ngườinhận", "nguoinhan",
];
const LAST_UPDATED: &[&str] = &[
    "lastupdated", "updatedat", "updated", "ngàycậpnhật", "ngaycapnhat", "cậpnhật", "capnhat",
];

const EMPLOYEE_ID: &[&str] = &[
    "employeeid", "employee_id", "empid", "mãnv", "manv", "mãnhânviên", "manhanvien",
];
const USER_NAME: &[&str] = &["name", "fullname", "họtên", "hoten", "tên", "ten"];
const ROLE: &[&str] = &["role", "vaitrò", "vaitro", "quyền", "quyen"];
const AVATAR_URL: &[&str] = &["avatarurl", "avatar", "ảnhđạidiện", "anhdaidien"];

const HISTORY_DEVICE_NAME: &[&str] = &["devicename", "device", "name", "tênthiếtbị", "tenthietbi"];
const ACTION: &[&str] = &["action", "hànhđộng", "hanhdong", "thaotác", "thaotac"];
const PERFORMER: &[&str] = &[
    "performer", "performedby", "ngườithựchiện", "nguoithuchien",
];
const TARGET: &[&str] = &["target", "username", "đốitượng", "doituong", "ngườinhận", "nguoinhan"];
const TIMESTAMP: &[&str] = &["timestamp", "time", "date", "thờigian", "thoigian"];

/// Defaults applied when a field is missing
pub mod defaults {
    pub const TAG_ID: &str = "N/A";
    pub const DEVICE_NAME: &str = "Không tên";
    pub const DEVICE_TYPE: &str = "Khác";
    pub const LOCATION: &str = "Chưa rõ";
    pub const USER_NAME: &str = "Unknown User";
    pub const EMPLOYEE_ID: &str = "N/A";
    pub const HISTORY_DEVICE_NAME: &str = "Không rõ";
    pub const PERFORMER: &str = "Hệ thống";
    pub const TIMESTAMP: &str = "Không rõ";
}

pub const DEVICE_ID_PREFIX: &str = "dev-";
pub const USER_ID_PREFIX: &str = "user-";
pub const HISTORY_ID_PREFIX: &str = "hist-";

/// Default display offset, UTC+07:00
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 7 * 3600;

/// Normalizer settings
#[derive(Debug, Clone)]
pub struct Normalizer {
    offset: FixedOffset,
    now: Option<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            offset: default_offset(),
            now: None,
        }
    }

    /// Display offset for history timestamps
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Pin the value used for a missing `lastUpdated`
    pub fn with_now(mut self, now: impl Into<String>) -> Self {
        self.now = Some(now.into());
        self
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    // ========== Single rows ==========

    pub fn device(&self, record: &RawRecord, index: usize) -> Device {
        let tag_id = record.first_of(TAG_ID);
        let status = match record.first_of(STATUS) {
            Some(raw) => AssetStatus::parse(raw).unwrap_or_else(|| {
                tracing::debug!(status = raw, index, "Unknown device status, using AVAILABLE");
                AssetStatus::Available
            }),
            None => AssetStatus::Available,
        };

        Device {
            id: prefixed_id(DEVICE_ID_PREFIX, record.first_of(ID), tag_id, index),
            tag_id: tag_id.unwrap_or(defaults::TAG_ID).to_string(),
            name: text_or(record, DEVICE_NAME, defaults::DEVICE_NAME),
            kind: text_or(record, DEVICE_TYPE, defaults::DEVICE_TYPE),
            location: text_or(record, LOCATION, defaults::LOCATION),
            configuration: text_or(record, CONFIGURATION, ""),
            accessory: text_or(record, ACCESSORY, ""),
            note: text_or(record, NOTE, ""),
            status,
            assigned_to: record.first_of(ASSIGNED_TO).map(str::to_string),
            last_updated: record
                .first_of(LAST_UPDATED)
                .map(str::to_string)
                .unwrap_or_else(|| self.now.clone().unwrap_or_else(util::now_iso)),
        }
    }

    pub fn user(&self, record: &RawRecord, index: usize) -> User {
        let employee_id = record.first_of(EMPLOYEE_ID);
        let role = match record.first_of(ROLE) {
            Some(raw) => UserRole::parse(raw).unwrap_or_else(|| {
                tracing::debug!(role = raw, index, "Unknown user role, using STAFF");
                UserRole::Staff
            }),
            None => UserRole::Staff,
        };

        User {
            id: prefixed_id(USER_ID_PREFIX, record.first_of(ID), employee_id, index),
            employee_id: employee_id.unwrap_or(defaults::EMPLOYEE_ID).to_string(),
            name: text_or(record, USER_NAME, defaults::USER_NAME),
            role,
            avatar_url: record.first_of(AVATAR_URL).map(str::to_string),
        }
    }

    pub fn history_entry(&self, record: &RawRecord, index: usize) -> HistoryEntry {
        let raw_action = record.first_of(ACTION).unwrap_or_default();

        HistoryEntry {
            id: prefixed_id(HISTORY_ID_PREFIX, record.first_of(ID), None, index),
            tag_id: text_or(record, TAG_ID, defaults::TAG_ID),
            device_name: text_or(record, HISTORY_DEVICE_NAME, defaults::HISTORY_DEVICE_NAME),
            action: HistoryAction::classify(raw_action),
            raw_action: raw_action.to_string(),
            timestamp: record
                .first_of(TIMESTAMP)
                .map(|raw| util::format_timestamp(raw, self.offset))
                .unwrap_or_else(|| defaults::TIMESTAMP.to_string()),
            performer: text_or(record, PERFORMER, defaults::PERFORMER),
            target: text_or(record, TARGET, ""),
        }
    }

    // ========== Batches ==========

    /// Normalize a device batch; ids are unique within the batch
    pub fn devices(&self, records: &[RawRecord]) -> Vec<Device> {
        let mut seen = HashSet::new();
        records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut device = self.device(r, i);
                device.id = dedupe_id(&mut seen, device.id, i);
                device
            })
            .collect()
    }

    /// Normalize a user batch; ids are unique within the batch
    pub fn users(&self, records: &[RawRecord]) -> Vec<User> {
        let mut seen = HashSet::new();
        records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut user = self.user(r, i);
                user.id = dedupe_id(&mut seen, user.id, i);
                user
            })
            .collect()
    }

    /// Normalize a history batch, most recent first.
    ///
    /// Rows are assumed to arrive oldest-first and are simply reversed.
    pub fn history(&self, records: &[RawRecord]) -> Vec<HistoryEntry> {
        let mut seen = HashSet::new();
        let mut entries: Vec<HistoryEntry> = records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let mut entry = self.history_entry(r, i);
                entry.id = dedupe_id(&mut seen, entry.id, i);
                entry
            })
            .collect();
        entries.reverse();
        entries
    }

    pub fn snapshot(
        &self,
        devices: &[RawRecord],
        users: &[RawRecord],
        history: &[RawRecord],
    ) -> Snapshot {
        Snapshot {
            devices: self.devices(devices),
            users: self.users(users),
            history: self.history(history),
        }
    }

    /// Normalize a `GET_DATA` response body.
    ///
    /// A missing or non-array section is treated as empty.
    pub fn snapshot_from_json(&self, body: &Value) -> Snapshot {
        let section = |name: &str| -> Vec<RawRecord> {
            body.get(name)
                .and_then(Value::as_array)
                .map(|rows| rows.iter().map(RawRecord::from_json).collect())
                .unwrap_or_default()
        };
        self.snapshot(&section("devices"), &section("users"), &section("history"))
    }
}

/// UTC+07:00
pub fn default_offset() -> FixedOffset {
    FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).expect("constant offset is within ±24h")
}

fn text_or(record: &RawRecord, keys: &[&str], default: &str) -> String {
    record.first_of(keys).unwrap_or(default).to_string()
}

fn prefixed_id(prefix: &str, explicit: Option<&str>, key: Option<&str>, index: usize) -> String {
    let base = explicit
        .or(key)
        .map(str::to_string)
        .unwrap_or_else(|| index.to_string());
    if base.starts_with(prefix) {
        base
    } else {
        format!("{prefix}{base}")
    }
}

fn dedupe_id(seen: &mut HashSet<String>, id: String, index: usize) -> String {
    if seen.insert(id.clone()) {
        return id;
    }
    let mut n = index;
    loop {
        let candidate = format!("{id}-{n}");
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
