use clap::Subcommand;
use evrent_client::settings::Settings;
use eyre::Result;

mod customers;
mod incidents;
mod personnel;
mod stations;
mod vehicles;

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Staff and admin accounts
    #[command(subcommand)]
    Personnel(personnel::Cmd),
    /// Fleet management
    #[command(subcommand)]
    Vehicles(vehicles::Cmd),
    /// Renter accounts
    #[command(subcommand)]
    Customers(customers::Cmd),
    #[command(subcommand)]
    Stations(stations::Cmd),
    /// System monitoring and incidents
    #[command(subcommand)]
    Incidents(incidents::Cmd),
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Personnel(cmd) => cmd.run(settings).await,
            Self::Vehicles(cmd) => cmd.run(settings).await,
            Self::Customers(cmd) => cmd.run(settings).await,
            Self::Stations(cmd) => cmd.run(settings).await,
            Self::Incidents(cmd) => cmd.run(settings).await,
        }
    }
}
