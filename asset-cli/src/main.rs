//! asset-cli: AssetFlow from the terminal
//!
//! Loads the asset sheet, identifies the caller and runs one command.
//!
//! ```bash
//! asset-cli --as NV001 devices --search laptop
//! asset-cli --as admin --password "$PW" assign IT-001 "Trần B"
//! ```

mod render;

use anyhow::{Context, bail};
use asset_client::{
    AppState, AssetClient, AssetStatus, ClientConfig, DeviceCreate, DeviceUpdate, HttpTransport,
    UserCreate, UserRole, UserUpdate,
};
use clap::{Parser, Subcommand};
use shared::query;

#[derive(Parser)]
#[command(name = "asset-cli")]
#[command(about = "AssetFlow asset tracking client", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Employee ID or name to act as
    #[arg(long = "as", global = true, env = "ASSET_USER", value_name = "USER")]
    user: Option<String>,

    /// Password for ADMIN users
    #[arg(long, global = true, env = "ASSET_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    /// Script endpoint (overrides ASSET_ENDPOINT_URL)
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List devices visible to you
    Devices {
        /// Match against name, tag or holder
        #[arg(short, long)]
        search: Option<String>,

        /// Exact device type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },

    /// List users
    Users {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show history visible to you, most recent first
    History,

    /// Device counters
    Stats,

    /// Show who you are identified as
    Whoami,

    /// Register a new device
    AddDevice {
        #[arg(long = "tag")]
        tag_id: String,

        #[arg(long)]
        name: String,

        #[arg(long = "type", default_value = "Laptop")]
        kind: String,

        #[arg(long, default_value = "")]
        configuration: String,

        #[arg(long, default_value = "")]
        location: String,
    },

    /// Edit device fields; omitted flags keep their value
    EditDevice {
        #[arg(value_name = "TAG")]
        tag_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type")]
        kind: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        configuration: Option<String>,

        #[arg(long)]
        accessory: Option<String>,

        #[arg(long)]
        note: Option<String>,

        /// AVAILABLE, ASSIGNED, PENDING or REPAIR
        #[arg(long, value_parser = parse_status)]
        status: Option<AssetStatus>,

        /// Holder; an empty value clears it
        #[arg(long)]
        assigned_to: Option<String>,
    },

    /// Hand an available device to a user
    Assign {
        #[arg(value_name = "TAG")]
        tag_id: String,

        /// Employee ID or name
        #[arg(value_name = "USER")]
        user: String,
    },

    /// Take back an assigned device
    Return {
        #[arg(value_name = "TAG")]
        tag_id: String,
    },

    /// Remove an available or pending device
    DeleteDevice {
        #[arg(value_name = "TAG")]
        tag_id: String,
    },

    /// Register a new user
    AddUser {
        #[arg(long)]
        employee_id: String,

        #[arg(long)]
        name: String,

        /// ADMIN, OPERATION or STAFF
        #[arg(long, value_parser = parse_role, default_value = "STAFF")]
        role: UserRole,
    },

    /// Edit a user; omitted flags keep their value
    EditUser {
        #[arg(value_name = "EMPLOYEE_ID")]
        employee_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_parser = parse_role)]
        role: Option<UserRole>,

        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// Remove a user
    DeleteUser {
        #[arg(value_name = "EMPLOYEE_ID")]
        employee_id: String,
    },
}

fn parse_status(raw: &str) -> Result<AssetStatus, String> {
    AssetStatus::parse(raw).ok_or_else(|| format!("unknown status '{raw}'"))
}

fn parse_role(raw: &str) -> Result<UserRole, String> {
    UserRole::parse(raw).ok_or_else(|| format!("unknown role '{raw}'"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asset_client=info,asset_cli=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.endpoint {
        config = config.with_endpoint(url);
    }

    let mut client = AssetClient::from_config(config)?;
    client
        .refresh()
        .await
        .context("could not load the asset sheet")?;

    let Some(who) = cli.user.as_deref() else {
        bail!("identify yourself with --as <employee id or name>");
    };
    let user = client.identify(who, cli.password.as_deref())?;
    tracing::debug!(user = %user.name, "Running as");

    run(&mut client, &cli).await?;

    if let Some(banner) = client.state().banner() {
        eprintln!("{}", render::banner(banner));
    }
    Ok(())
}

/// Render the read-only commands; `None` for writes
fn view(state: &AppState, command: &Commands) -> Option<String> {
    let text = match command {
        Commands::Devices { search, kind } => {
            let found = query::search_devices(
                state.visible_devices(),
                search.as_deref().unwrap_or_default(),
                kind.as_deref(),
            );
            render::devices(&found)
        }
        Commands::Users { search } => {
            let found = query::search_users(state.users(), search.as_deref().unwrap_or_default());
            render::users(&found)
        }
        Commands::History => render::history(&state.visible_history()),
        Commands::Stats => render::stats(&state.stats()),
        Commands::Whoami => state
            .current_user()
            .map_or_else(|| "Chưa xác định.\n".to_string(), render::profile),
        _ => return None,
    };
    Some(text)
}

async fn run<T: HttpTransport>(client: &mut AssetClient<T>, cli: &Cli) -> anyhow::Result<()> {
    if let Some(text) = view(client.state(), &cli.command) {
        print!("{text}");
        return Ok(());
    }

    let confirm = |prompt: &str| cli.yes || render::confirm(prompt);

    match &cli.command {
        Commands::Devices { .. }
        | Commands::Users { .. }
        | Commands::History
        | Commands::Stats
        | Commands::Whoami => {}
        Commands::AddDevice {
            tag_id,
            name,
            kind,
            configuration,
            location,
        } => {
            client
                .add_device(DeviceCreate {
                    tag_id: tag_id.clone(),
                    name: name.clone(),
                    kind: kind.clone(),
                    configuration: configuration.clone(),
                    location: location.clone(),
                })
                .await?;
            println!("Đã thêm {tag_id}");
        }
        Commands::EditDevice {
            tag_id,
            name,
            kind,
            location,
            configuration,
            accessory,
            note,
            status,
            assigned_to,
        } => {
            let update = DeviceUpdate {
                name: name.clone(),
                kind: kind.clone(),
                location: location.clone(),
                configuration: configuration.clone(),
                accessory: accessory.clone(),
                note: note.clone(),
                status: *status,
                assigned_to: assigned_to.clone(),
            };
            client.edit_device(tag_id, update).await?;
            println!("Đã cập nhật {tag_id}");
        }
        Commands::Assign { tag_id, user } => {
            client.assign_device(tag_id, user).await?;
            println!("Đã cấp phát {tag_id}");
        }
        Commands::Return { tag_id } => {
            client.return_device(tag_id, confirm).await?;
            println!("Đã thu hồi {tag_id}");
        }
        Commands::DeleteDevice { tag_id } => {
            client.delete_device(tag_id, confirm).await?;
            println!("Đã xóa {tag_id}");
        }
        Commands::AddUser {
            employee_id,
            name,
            role,
        } => {
            client
                .add_user(UserCreate {
                    name: name.clone(),
                    employee_id: employee_id.clone(),
                    role: *role,
                })
                .await?;
            println!("Đã thêm {employee_id}");
        }
        Commands::EditUser {
            employee_id,
            name,
            role,
            avatar_url,
        } => {
            let update = UserUpdate {
                name: name.clone(),
                role: *role,
                avatar_url: avatar_url.clone(),
            };
            client.edit_user(employee_id, update).await?;
            println!("Đã cập nhật {employee_id}");
        }
        Commands::DeleteUser { employee_id } => {
            client.delete_user(employee_id, confirm).await?;
            println!("Đã xóa {employee_id}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use asset_client::{ClientError, ClientResult};
    use clap::CommandFactory;
    use serde_json::{Value, json};

    /// Read-only sheet; writes are refused
    struct Sheet(Value);

    #[async_trait]
    impl HttpTransport for Sheet {
        async fn get_json(&self, _url: &str) -> ClientResult<Value> {
            Ok(self.0.clone())
        }

        async fn get_text(&self, url: &str) -> ClientResult<String> {
            Err(ClientError::InvalidResponse(format!("no CSV export at {url}")))
        }

        async fn post_text(&self, url: &str, _body: String) -> ClientResult<()> {
            Err(ClientError::InvalidResponse(format!("unexpected write to {url}")))
        }
    }

    async fn client_as(who: &str) -> AssetClient<Sheet> {
        let sheet = Sheet(json!({
            "devices": [
                { "tagId": "IT-001", "name": "Laptop A", "status": "AVAILABLE" },
                { "tagId": "IT-002", "name": "Laptop B", "status": "ASSIGNED", "assignedTo": "Trần B" }
            ],
            "users": [
                { "employeeId": "O01", "name": "Nguyễn Văn A", "role": "OPERATION" },
                { "employeeId": "S01", "name": "Trần B", "role": "STAFF" }
            ],
            "history": []
        }));
        let mut client = AssetClient::new(sheet, ClientConfig::new("https://sheet.test/exec")).unwrap();
        client.refresh().await.unwrap();
        client.identify(who, None).unwrap();
        client
    }

    #[tokio::test]
    async fn test_staff_can_list_users() {
        let client = client_as("S01").await;
        let out = view(client.state(), &Commands::Users { search: None }).unwrap();
        assert!(out.contains("O01"));
        assert!(out.contains("Trần B"));

        let out = view(
            client.state(),
            &Commands::Users {
                search: Some("nguyễn".into()),
            },
        )
        .unwrap();
        assert!(out.contains("O01"));
        assert!(!out.contains("S01"));
    }

    #[tokio::test]
    async fn test_staff_device_list_is_filtered() {
        let client = client_as("S01").await;
        let out = view(
            client.state(),
            &Commands::Devices {
                search: None,
                kind: None,
            },
        )
        .unwrap();
        assert!(out.contains("IT-002"));
        assert!(!out.contains("IT-001"));
    }

    #[tokio::test]
    async fn test_whoami_shows_profile() {
        let client = client_as("S01").await;
        let out = view(client.state(), &Commands::Whoami).unwrap();
        assert!(out.contains("Trần B"));
        assert!(out.contains("S01"));
        assert!(out.contains("STAFF"));
    }

    #[tokio::test]
    async fn test_writes_are_not_views() {
        let client = client_as("O01").await;
        let command = Commands::Return {
            tag_id: "IT-002".into(),
        };
        assert!(view(client.state(), &command).is_none());
    }

    #[test]
    fn test_add_device_type_defaults_to_laptop() {
        let cli = Cli::try_parse_from([
            "asset-cli", "add-device", "--tag", "IT-010", "--name", "ThinkPad",
        ])
        .unwrap();
        match cli.command {
            Commands::AddDevice { kind, location, .. } => {
                assert_eq!(kind, "Laptop");
                assert_eq!(location, "");
            }
            _ => panic!("expected add-device"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_edit_device() {
        let cli = Cli::try_parse_from([
            "asset-cli",
            "--as",
            "A01",
            "edit-device",
            "IT-001",
            "--status",
            "repair",
            "--assigned-to",
            "",
        ])
        .unwrap();
        match cli.command {
            Commands::EditDevice {
                tag_id,
                status,
                assigned_to,
                name,
                ..
            } => {
                assert_eq!(tag_id, "IT-001");
                assert_eq!(status, Some(AssetStatus::Repair));
                assert_eq!(assigned_to.as_deref(), Some(""));
                assert!(name.is_none());
            }
            _ => panic!("expected edit-device"),
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result = Cli::try_parse_from([
            "asset-cli", "add-user", "--employee-id", "S9", "--name", "X", "--role", "boss",
        ]);
        assert!(result.is_err());
    }
}
