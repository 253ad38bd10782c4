//! Write payloads sent to the sheet script
//!
//! Every mutation is one flat JSON object the remote script branches on via
//! its `action` field:
//!
//! ```json
//! {
//!   "action": "ASSIGN_DEVICE",
//!   "tagId": "IT-001",
//!   "userName": "Nguyễn Văn A",
//!   "timestamp": "2024-05-01T08:30:00.000Z",
//!   "performedBy": "Admin"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Device, DeviceCreate, User, UserCreate};
use crate::util;

/// A mutation of the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "action",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    AddDevice(DeviceCreate),
    /// Full device as edited, matched remotely by `tagId`
    EditDevice(Device),
    AssignDevice { tag_id: String, user_name: String },
    ReturnDevice { tag_id: String },
    DeleteDevice { tag_id: String },
    AddUser(UserCreate),
    /// Full user as edited, matched remotely by `employeeId`
    EditUser(User),
    DeleteUser { employee_id: String, name: String },
}

impl Command {
    /// The `action` tag as sent on the wire
    pub fn action(&self) -> &'static str {
        match self {
            Self::AddDevice(_) => "ADD_DEVICE",
            Self::EditDevice(_) => "EDIT_DEVICE",
            Self::AssignDevice { .. } => "ASSIGN_DEVICE",
            Self::ReturnDevice { .. } => "RETURN_DEVICE",
            Self::DeleteDevice { .. } => "DELETE_DEVICE",
            Self::AddUser(_) => "ADD_USER",
            Self::EditUser(_) => "EDIT_USER",
            Self::DeleteUser { .. } => "DELETE_USER",
        }
    }

    /// Tag or employee ID of the row this command targets
    pub fn subject(&self) -> &str {
        match self {
            Self::AddDevice(d) => &d.tag_id,
            Self::EditDevice(d) => &d.tag_id,
            Self::AssignDevice { tag_id, .. }
            | Self::ReturnDevice { tag_id }
            | Self::DeleteDevice { tag_id } => tag_id,
            Self::AddUser(u) => &u.employee_id,
            Self::EditUser(u) => &u.employee_id,
            Self::DeleteUser { employee_id, .. } => employee_id,
        }
    }
}

/// Command plus the audit fields every write carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteRequest {
    #[serde(flatten)]
    pub command: Command,
    pub timestamp: String,
    /// Name of the acting user
    pub performed_by: String,
}

impl WriteRequest {
    /// Stamp a command with the current time
    pub fn new(command: Command, performed_by: impl Into<String>) -> Self {
        Self {
            command,
            timestamp: util::now_iso(),
            performed_by: performed_by.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv;
    use crate::models::{AssetStatus, UserRole};
    use crate::normalize::Normalizer;
    use crate::record::RawRecord;

    #[test]
    fn test_assign_payload_shape() {
        let request = WriteRequest {
            command: Command::AssignDevice {
                tag_id: "IT-001".into(),
                user_name: "An".into(),
            },
            timestamp: "2024-05-01T08:30:00.000Z".into(),
            performed_by: "Admin".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "action": "ASSIGN_DEVICE",
                "tagId": "IT-001",
                "userName": "An",
                "timestamp": "2024-05-01T08:30:00.000Z",
                "performedBy": "Admin",
            })
        );
    }

    #[test]
    fn test_add_payloads_are_flat() {
        let request = WriteRequest::new(
            Command::AddDevice(DeviceCreate {
                tag_id: "IT-9".into(),
                name: "ThinkPad".into(),
                kind: "Laptop".into(),
                configuration: "i7".into(),
                location: "HCM".into(),
            }),
            "Admin",
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["action"], "ADD_DEVICE");
        assert_eq!(value["tagId"], "IT-9");
        assert_eq!(value["type"], "Laptop");

        let request = WriteRequest::new(
            Command::AddUser(UserCreate {
                name: "Bình".into(),
                employee_id: "NV-02".into(),
                role: UserRole::Operation,
            }),
            "Admin",
        );
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["action"], "ADD_USER");
        assert_eq!(value["employeeId"], "NV-02");
        assert_eq!(value["role"], "OPERATION");
    }

    #[test]
    fn test_delete_user_payload() {
        let command = Command::DeleteUser {
            employee_id: "NV-02".into(),
            name: "Bình".into(),
        };
        assert_eq!(command.action(), "DELETE_USER");
        assert_eq!(command.subject(), "NV-02");
        let value = serde_json::to_value(WriteRequest::new(command, "Admin")).unwrap();
        assert_eq!(value["employeeId"], "NV-02");
        assert_eq!(value["name"], "Bình");
    }

    #[test]
    fn test_edit_device_payload_renormalizes() {
        let normalizer = Normalizer::new().with_now("2024-01-01T00:00:00.000Z");
        let records = csv::parse(
            "tagid,name,type,location,configuration,accessory,note,status,assignedto\n\
             IT-001,\"MacBook, 14\",Laptop,HN,M3,Sạc,\"ghi chú \"\"mới\"\"\",assigned,NV-01",
        );
        let original = normalizer.device(&records[0], 0);
        assert_eq!(original.status, AssetStatus::Assigned);

        let payload = serde_json::to_value(WriteRequest::new(
            Command::EditDevice(original.clone()),
            "Admin",
        ))
        .unwrap();
        let again = normalizer.device(&RawRecord::from_json(&payload), 0);

        assert_eq!(again.tag_id, original.tag_id);
        assert_eq!(again.name, original.name);
        assert_eq!(again.kind, original.kind);
        assert_eq!(again.location, original.location);
        assert_eq!(again.configuration, original.configuration);
        assert_eq!(again.accessory, original.accessory);
        assert_eq!(again.note, original.note);
        assert_eq!(again.status, original.status);
        assert_eq!(again.assigned_to, original.assigned_to);
    }

    #[test]
    fn test_request_deserializes_back() {
        let request = WriteRequest::new(Command::ReturnDevice { tag_id: "IT-3".into() }, "Op");
        let json = request.to_json().unwrap();
        let parsed: WriteRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
