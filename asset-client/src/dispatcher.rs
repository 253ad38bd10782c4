//! Command dispatcher
//!
//! [`AssetClient`] is the only writer of [`AppState`]. Every mutating call
//! runs its guards first (role, required fields, status, duplicates,
//! confirmation) so a rejected action never reaches the network. Accepted
//! actions are posted fire-and-forget, followed by a fixed settle delay and
//! a full refetch.

use shared::error::{ErrorCode, ValidationError, same_identifier};
use shared::models::{AssetStatus, Device, DeviceCreate, DeviceUpdate, User, UserCreate, UserUpdate};
use shared::visibility::Actor;
use shared::{Command, Normalizer, WriteRequest, query, util};

use crate::state::{AppState, Banner};
use crate::{ClientConfig, ClientError, ClientResult, DataSource, HttpTransport, NetworkTransport};

/// Stateful client for the asset sheet
#[derive(Debug)]
pub struct AssetClient<T: HttpTransport = NetworkTransport> {
    transport: T,
    config: ClientConfig,
    source: DataSource,
    normalizer: Normalizer,
    state: AppState,
}

impl AssetClient<NetworkTransport> {
    /// Build a client with the reqwest transport
    pub fn from_config(config: ClientConfig) -> ClientResult<Self> {
        let transport = NetworkTransport::new(&config)?;
        Self::new(transport, config)
    }
}

impl<T: HttpTransport> AssetClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> ClientResult<Self> {
        let source = config.data_source()?;
        let normalizer = Normalizer::new().with_offset(config.display_offset);
        Ok(Self {
            transport,
            config,
            source,
            normalizer,
            state: AppState::default(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========== Reads ==========

    /// Replace the snapshot with a fresh fetch.
    ///
    /// On failure the previous snapshot stays and a read banner is set.
    pub async fn refresh(&mut self) -> ClientResult<()> {
        self.state.is_loading = true;
        self.state.banner = None;
        let result = self.source.fetch(&self.transport, &self.normalizer).await;
        self.state.is_loading = false;

        match result {
            Ok(snapshot) => {
                tracing::info!(
                    devices = snapshot.devices.len(),
                    users = snapshot.users.len(),
                    history = snapshot.history.len(),
                    "Dataset loaded"
                );
                // Pick up edits to the identified user (role, name)
                if let Some(current) = &mut self.state.current_user
                    && let Some(fresh) = snapshot.user_by_employee_id(&current.employee_id)
                {
                    *current = fresh.clone();
                }
                self.state.snapshot = snapshot;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load dataset");
                self.state.banner = Some(Banner::read(e.to_string()));
                Err(e)
            }
        }
    }

    // ========== Identification ==========

    /// Identify as a user by employee ID or name.
    ///
    /// ADMIN users must supply the configured admin password.
    pub fn identify(&mut self, query: &str, password: Option<&str>) -> ClientResult<&User> {
        let user = query::find_user(self.state.users(), query)
            .cloned()
            .ok_or(ClientError::Unauthorized(ErrorCode::UnknownUser))?;

        if user.role.is_admin() {
            let accepted = matches!(
                (self.config.admin_password.as_deref(), password),
                (Some(expected), Some(given)) if expected == given
            );
            if !accepted {
                tracing::warn!(employee_id = %user.employee_id, "Admin identification refused");
                return Err(ClientError::Unauthorized(ErrorCode::InvalidCredentials));
            }
        }

        tracing::info!(employee_id = %user.employee_id, role = %user.role, "User identified");
        Ok(&*self.state.current_user.insert(user))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.state.current_user.take() {
            tracing::info!(employee_id = %user.employee_id, "User logged out");
        }
    }

    // ========== Devices ==========

    pub async fn add_device(&mut self, device: DeviceCreate) -> ClientResult<()> {
        let actor = self.require_admin()?;
        let device = DeviceCreate {
            tag_id: device.tag_id.trim().to_string(),
            name: device.name.trim().to_string(),
            kind: device.kind.trim().to_string(),
            configuration: device.configuration.trim().to_string(),
            location: device.location.trim().to_string(),
        };
        require(&device.tag_id, "tagId")?;
        require(&device.name, "name")?;
        if self
            .state
            .devices()
            .iter()
            .any(|d| same_identifier(&d.tag_id, &device.tag_id))
        {
            return Err(ValidationError::DuplicateTagId(device.tag_id).into());
        }

        self.send(&actor, Command::AddDevice(device)).await
    }

    /// Edit a device, applying the change locally before the write.
    ///
    /// The local change is reverted if the write fails.
    pub async fn edit_device(&mut self, tag_id: &str, update: DeviceUpdate) -> ClientResult<()> {
        let actor = self.require_admin()?;
        let mut updated = update.apply(self.find_device(tag_id)?);
        require(&updated.name, "name")?;
        if updated.status == AssetStatus::Assigned {
            if updated.assigned_to.is_none() {
                return Err(ValidationError::RequiredField("assignedTo").into());
            }
        } else {
            updated.assigned_to = None;
        }
        updated.last_updated = util::now_iso();

        let previous = self.state.replace_device(updated.clone());
        let result = self.send(&actor, Command::EditDevice(updated)).await;
        if result.is_err()
            && let Some(previous) = previous
        {
            tracing::info!(tag_id = %previous.tag_id, "Reverting optimistic device edit");
            self.state.replace_device(previous);
        }
        result
    }

    /// Hand an AVAILABLE device to a user (by employee ID or name)
    pub async fn assign_device(&mut self, tag_id: &str, assignee: &str) -> ClientResult<()> {
        let actor = self.require_management()?;
        let command = {
            let device = self.find_device(tag_id)?;
            if device.status != AssetStatus::Available {
                return Err(ValidationError::DeviceNotAvailable {
                    tag_id: device.tag_id.clone(),
                    status: device.status,
                }
                .into());
            }
            let user = query::find_user(self.state.users(), assignee)
                .ok_or_else(|| ValidationError::UserNotFound(assignee.to_string()))?;
            Command::AssignDevice {
                tag_id: device.tag_id.clone(),
                user_name: user.name.clone(),
            }
        };

        self.send(&actor, command).await
    }

    /// Take back an ASSIGNED device
    pub async fn return_device(
        &mut self,
        tag_id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> ClientResult<()> {
        let actor = self.require_management()?;
        let device = self.find_device(tag_id)?;
        if device.status != AssetStatus::Assigned {
            return Err(ValidationError::DeviceNotAssigned {
                tag_id: device.tag_id.clone(),
                status: device.status,
            }
            .into());
        }
        let prompt = format!("Thu hồi {}?", device.name);
        let tag_id = device.tag_id.clone();
        if !confirm(&prompt) {
            return Err(ClientError::Cancelled(prompt));
        }

        self.send(&actor, Command::ReturnDevice { tag_id }).await
    }

    /// Remove an AVAILABLE or PENDING device
    pub async fn delete_device(
        &mut self,
        tag_id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> ClientResult<()> {
        let actor = self.require_admin()?;
        let device = self.find_device(tag_id)?;
        if !device.status.is_deletable() {
            return Err(ValidationError::DeviceNotDeletable {
                tag_id: device.tag_id.clone(),
                status: device.status,
            }
            .into());
        }
        let prompt = format!("Xóa thiết bị {}?", device.name);
        let tag_id = device.tag_id.clone();
        if !confirm(&prompt) {
            return Err(ClientError::Cancelled(prompt));
        }

        self.send(&actor, Command::DeleteDevice { tag_id }).await
    }

    // ========== Users ==========

    pub async fn add_user(&mut self, user: UserCreate) -> ClientResult<()> {
        let actor = self.require_management()?;
        let user = UserCreate {
            name: user.name.trim().to_string(),
            employee_id: user.employee_id.trim().to_string(),
            role: user.role,
        };
        require(&user.employee_id, "employeeId")?;
        require(&user.name, "name")?;
        if self
            .state
            .users()
            .iter()
            .any(|u| same_identifier(&u.employee_id, &user.employee_id))
        {
            return Err(ValidationError::DuplicateEmployeeId(user.employee_id).into());
        }

        self.send(&actor, Command::AddUser(user)).await
    }

    pub async fn edit_user(&mut self, employee_id: &str, update: UserUpdate) -> ClientResult<()> {
        let actor = self.require_admin()?;
        let updated = update.apply(self.find_user(employee_id)?);
        require(&updated.name, "name")?;

        self.send(&actor, Command::EditUser(updated)).await
    }

    pub async fn delete_user(
        &mut self,
        employee_id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> ClientResult<()> {
        let actor = self.require_admin()?;
        let user = self.find_user(employee_id)?;
        let prompt = format!("Xóa nhân sự {}?", user.name);
        let command = Command::DeleteUser {
            employee_id: user.employee_id.clone(),
            name: user.name.clone(),
        };
        if !confirm(&prompt) {
            return Err(ClientError::Cancelled(prompt));
        }

        self.send(&actor, command).await
    }

    // ========== Internals ==========

    /// Post a write, wait for the sheet to settle, then refetch.
    ///
    /// A failed refetch leaves its banner but does not fail the write.
    async fn send(&mut self, actor: &Actor, command: Command) -> ClientResult<()> {
        let endpoint = self.config.write_endpoint()?.to_string();
        let request = WriteRequest::new(command, actor.name.clone());
        let body = request.to_json()?;
        let action = request.command.action();

        self.state.is_saving = true;
        self.state.banner = None;
        tracing::info!(
            action,
            subject = request.command.subject(),
            performed_by = %actor.name,
            "Sending write"
        );

        if let Err(e) = self.transport.post_text(&endpoint, body).await {
            tracing::warn!(action, error = %e, "Write failed");
            self.state.banner = Some(Banner::write(e.to_string()));
            self.state.is_saving = false;
            return Err(e);
        }

        tokio::time::sleep(self.config.settle_delay).await;
        if let Err(e) = self.refresh().await {
            tracing::warn!(action, error = %e, "Refetch after write failed");
        }
        self.state.is_saving = false;
        Ok(())
    }

    fn require_actor(&self) -> ClientResult<Actor> {
        self.state
            .actor()
            .ok_or(ClientError::Unauthorized(ErrorCode::NotIdentified))
    }

    fn require_admin(&self) -> ClientResult<Actor> {
        let actor = self.require_actor()?;
        if !actor.role.is_admin() {
            return Err(ClientError::Forbidden(ErrorCode::AdminRequired));
        }
        Ok(actor)
    }

    fn require_management(&self) -> ClientResult<Actor> {
        let actor = self.require_actor()?;
        if !actor.role.is_management() {
            return Err(ClientError::Forbidden(ErrorCode::ManagementRequired));
        }
        Ok(actor)
    }

    fn find_device(&self, tag_id: &str) -> ClientResult<&Device> {
        self.state
            .devices()
            .iter()
            .find(|d| same_identifier(&d.tag_id, tag_id))
            .ok_or_else(|| ValidationError::DeviceNotFound(tag_id.to_string()).into())
    }

    fn find_user(&self, employee_id: &str) -> ClientResult<&User> {
        self.state
            .users()
            .iter()
            .find(|u| same_identifier(&u.employee_id, employee_id))
            .ok_or_else(|| ValidationError::UserNotFound(employee_id.to_string()).into())
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField(field));
    }
    Ok(())
}
