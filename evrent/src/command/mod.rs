use clap::Subcommand;
use evrent_client::api_client::ApiClient;
use evrent_client::messages;
use evrent_client::notify::{DesktopNotifier, LogNotifier, Notifier};
use evrent_client::screens::{ScreenContext, Submit};
use evrent_client::settings::{NotificationMode, Settings};
use eyre::{bail, eyre, Context, Result};
use std::fmt::Display;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod account;
mod admin;
mod dashboard;
mod info;
mod renter;
mod staff;
mod status;

#[derive(Subcommand)]
pub enum EvrentCmd {
    /// Show config paths, session state and version
    Info,
    /// Check that the backend is reachable
    Status,
    #[command(subcommand)]
    Account(account::Cmd),
    /// Open the terminal dashboard for the signed-in role
    Dashboard,
    #[command(subcommand)]
    Admin(admin::Cmd),
    #[command(subcommand)]
    Staff(staff::Cmd),
    #[command(subcommand)]
    Renter(renter::Cmd),
}

impl EvrentCmd {
    #[tokio::main]
    pub async fn run(self) -> Result<()> {
        let settings = Settings::new()?;

        match self {
            Self::Dashboard => {
                init_file_logging(&settings)?;
                dashboard::run(&settings).await
            }
            cmd => {
                color_eyre::install()?;
                init_logging();
                cmd.run_command(&settings).await
            }
        }
    }

    async fn run_command(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Info => {
                info::run(settings);
                Ok(())
            }
            Self::Status => status::run(settings).await,
            Self::Account(cmd) => cmd.run(settings).await,
            Self::Admin(cmd) => cmd.run(settings).await,
            Self::Staff(cmd) => cmd.run(settings).await,
            Self::Renter(cmd) => cmd.run(settings).await,
            Self::Dashboard => dashboard::run(settings).await,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env("EVRENT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter())
        .init();
}

/// The dashboard owns the terminal, so its logs go to a file instead.
fn init_file_logging(settings: &Settings) -> Result<()> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_path)
        .wrap_err("Failed to open the log file")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(env_filter())
        .init();
    Ok(())
}

pub(crate) fn notifier(settings: &Settings) -> Arc<dyn Notifier> {
    match settings.notifications {
        NotificationMode::Log => Arc::new(LogNotifier),
        NotificationMode::Desktop => Arc::new(DesktopNotifier::new("evrent")),
    }
}

/// Context for commands that need a signed-in user.
pub(crate) fn context(settings: &Settings) -> Result<ScreenContext> {
    let Some(session) = settings.session() else {
        bail!("You are not logged in. Run `evrent account login` first.");
    };
    let api = ApiClient::new(&settings.server_address, Some(&session))?;
    Ok(ScreenContext::new(api, notifier(settings), settings.clone()))
}

/// Turns a form submission into the command's exit status.
pub(crate) fn finish(outcome: Submit) -> Result<()> {
    match outcome {
        Submit::Done => Ok(()),
        Submit::Rejected(errors) => {
            for err in &errors {
                eprintln!("  {err}");
            }
            bail!(messages::INVALID_FORM)
        }
        Submit::Failed => bail!(messages::GENERIC_ERROR),
    }
}

pub(crate) fn ensure_done(done: bool) -> Result<()> {
    if done {
        Ok(())
    } else {
        bail!(messages::GENERIC_ERROR)
    }
}

pub(crate) fn parse_choice<T>(value: &str) -> Result<evrent_client::filter::Choice<T>>
where
    T: FromStr,
    T::Err: Display,
{
    evrent_client::filter::Choice::from_str(value).map_err(|e| eyre!("{e}"))
}

pub(crate) fn parse_time(value: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| format!("Expected an RFC 3339 time: {e}"))
}

pub(crate) fn format_time(value: Option<OffsetDateTime>) -> String {
    value
        .and_then(|x| x.format(&Rfc3339).ok())
        .unwrap_or_else(|| "-".into())
}

/// Prints rows under a header with columns padded to the widest cell.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|x| x.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell}{}", " ".repeat(w - cell.chars().count())))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!("{}", line(headers.to_vec()));
    for row in rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
    if rows.is_empty() {
        println!("(empty)");
    }
}
