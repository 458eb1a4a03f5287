use clap::Parser;
use evrent::command::EvrentCmd;
use evrent::VERSION;
use eyre::Result;

/// Operations console for the EV rental platform.
#[derive(Parser)]
#[command(
    author = "EV Rental Team",
    version = VERSION,
    )]
struct Evrent {
    #[command(subcommand)]
    evrent: EvrentCmd,
}

impl Evrent {
    fn run(self) -> Result<()> {
        self.evrent.run()
    }
}

fn main() -> Result<()> {
    Evrent::parse().run()
}
