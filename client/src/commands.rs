//! Command-line shell over the session core. Every command boots the
//! session first, the same way the dashboards do on page load.

use chrono::Utc;
use clap::{Parser, Subcommand};
use swms_client::dtos::{LoginDTO, RegisterDTO};
use swms_client::{
    AuthApi, ClientError, Config, FileTokenStore, GuardDecision, RestClient, RouteTable,
    SessionStore, UserType,
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "swms-client", about = "Smart Waste Management session client", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and persist the bearer token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "SWMS_PASSWORD")]
        password: String,
        /// Location to return to after signing in
        #[arg(long)]
        from: Option<String>,
    },
    /// Drop the persisted token and close the backend session
    Logout,
    /// Show the current identity
    Whoami,
    /// Check whether a dashboard view may be opened
    Open { path: String },
    /// Create an account for one of the dashboard roles
    Register {
        #[arg(long)]
        role: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, env = "SWMS_PASSWORD")]
        password: String,
    },
}

impl Cli {
    pub async fn execute(self, config: &Config) -> Result<(), ClientError> {
        let api = RestClient::from_config(config)?;
        let session = SessionStore::new(api, FileTokenStore::new(&config.token_store_path));
        let routes = RouteTable::from_config(config);

        let state = session.hydrate().await;
        info!("Session ready, authenticated: {}", state.is_authenticated());

        match self.command {
            Command::Login {
                email,
                password,
                from,
            } => {
                let identity = session.sign_in(&LoginDTO { email, password }).await?;
                let target = routes.post_login_target(from.as_deref(), &identity);
                println!("Logged in as {}", identity.display_name());
                println!("Continue to {}", target);
            }
            Command::Logout => {
                session.sign_out().await;
                println!("Logged out");
            }
            Command::Whoami => match session.identity() {
                Some(identity) => {
                    println!("Name:      {}", identity.display_name());
                    println!("User id:   {}", identity.user_id.as_deref().unwrap_or("-"));
                    println!("Email:     {}", identity.email.as_deref().unwrap_or("-"));
                    println!(
                        "Role:      {}",
                        identity
                            .user_type
                            .as_ref()
                            .map(UserType::to_string)
                            .unwrap_or_else(|| "-".to_string())
                    );
                    println!("Phone:     {}", identity.phone.as_deref().unwrap_or("-"));
                    if identity.is_expired(Utc::now()) {
                        println!("Token expiry has passed; the backend will ask for a new login");
                    }
                    if let Some(token) = session.token() {
                        match session.api().current_user(&token).await {
                            Ok(profile) => {
                                if let Some(address) = profile.address {
                                    println!("Address:   {}", address);
                                }
                            }
                            Err(e) => warn!("Could not load profile: {}", e),
                        }
                    }
                }
                None => println!("Not logged in"),
            },
            Command::Open { path } => match routes.resolve(&path, &session.snapshot()) {
                Some(GuardDecision::Render) => println!("{} may be opened", path),
                Some(GuardDecision::Pending) => println!("Session still loading"),
                Some(GuardDecision::Redirect { to, from, reason }) => {
                    println!("{} is not available ({:?}), redirecting to {}", path, reason, to);
                    if let Some(from) = from {
                        println!("Log in with --from {} to come back here", from);
                    }
                }
                None => println!("No view at {}", path),
            },
            Command::Register {
                role,
                name,
                email,
                phone,
                password,
            } => {
                let request = RegisterDTO {
                    name,
                    email,
                    phone,
                    password,
                    user_type: UserType::from(role.to_uppercase().replace('-', "_")),
                };
                let created = session.api().register(&request).await?;
                println!(
                    "{}",
                    created
                        .message
                        .unwrap_or_else(|| "Registration successful".to_string())
                );
                println!("Log in with `swms-client login --email {}`", request.email);
            }
        }
        Ok(())
    }
}
