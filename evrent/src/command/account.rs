use clap::Subcommand;
use evrent_client::settings::Settings;
use eyre::Result;

mod login;
mod logout;
mod whoami;

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Sign in and store the session token
    Login(login::Cmd),
    /// Drop the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.run(settings).await,
            Self::Logout => logout::run(settings).await,
            Self::Whoami => whoami::run(settings).await,
        }
    }
}
