use crate::{
    conf::settings,
    pkg::server::listen,
    prelude::Result,
    token::issue_token,
};
use clap::{Parser, Subcommand};

mod migrate;

#[derive(Parser)]
#[command(about = "jobs and companies api")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    Listen,
    Migrate,
    /// Mint a bearer token for local use
    Token {
        #[arg(long)]
        username: String,
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Migrate) => {
            migrate::apply().await?;
        }
        Some(SubCommandType::Token { username, admin }) => {
            let token = issue_token(
                &settings.jwt_secret,
                &username,
                admin,
                settings.token_ttl_hours,
            )?;
            println!("{}", token);
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
