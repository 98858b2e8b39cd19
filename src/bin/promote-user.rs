//! Out-of-band role elevation: `promote-user <email> <user|admin|super_admin>`.

use std::env;
use std::process::ExitCode;

use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;

use cinema_server::config::Config;
use cinema_server::db;
use cinema_server::models::UserRole;

fn parse_role(raw: &str) -> Option<UserRole> {
    match raw {
        "user" => Some(UserRole::User),
        "admin" => Some(UserRole::Admin),
        "super_admin" => Some(UserRole::SuperAdmin),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (email, role) = match args.as_slice() {
        [email, role] => match parse_role(role) {
            Some(role) => (email.trim().to_lowercase(), role),
            None => {
                eprintln!("unknown role '{role}', expected user, admin or super_admin");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            eprintln!("usage: promote-user <email> <user|admin|super_admin>");
            return ExitCode::FAILURE;
        }
    };

    let config = Config::from_env();
    let pool = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return ExitCode::FAILURE;
        }
    };

    match db::users::set_role(&pool, &email, role).await {
        Ok(Some(user)) => {
            tracing::info!(user_id = %user.id, role = ?user.role, "Role updated");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            tracing::error!(%email, "No user with that email");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to update role");
            ExitCode::FAILURE
        }
    }
}
