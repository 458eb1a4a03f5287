use crate::domain::RentalTab;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File as ConfigFile, FileFormat};
use eyre::{eyre, Context, Result};
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const EXAMPLE_CONFIG: &str = include_str!("../config.toml");
const SESSION_FILENAME: &str = "session";
const TAB_FILENAME: &str = "rental_tab";
const LOG_FILENAME: &str = "evrent.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    Log,
    Desktop,
}

/// Base deposits used by the check-in preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct DepositSettings {
    pub car: u64,
    pub motorbike: u64,
}

// TODO: move the session token to the OS keyring once login supports refresh tokens.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Settings {
    pub server_address: String,
    pub api_base_url: String,
    pub session_path: String,
    pub tab_path: String,
    pub log_path: String,
    pub notifications: NotificationMode,
    pub deposit: DepositSettings,
}

impl Settings {
    pub fn session(&self) -> Option<String> {
        let path = PathBuf::from(&self.session_path);

        if !path.exists() {
            return None;
        }

        fs_err::read_to_string(path)
            .ok()
            .map(|x| x.trim().to_string())
            .filter(|x| !x.is_empty())
    }

    pub fn save_session(&self, token: &str) -> Result<()> {
        write_creating_parent(Path::new(&self.session_path), token)
            .wrap_err("Failed to store session in file")
    }

    pub fn clear_session(&self) -> Result<()> {
        let path = PathBuf::from(&self.session_path);
        if path.exists() {
            fs_err::remove_file(path)?;
        }
        Ok(())
    }

    /// Last tab selected on the staff rental management screen.
    pub fn rental_tab(&self) -> RentalTab {
        fs_err::read_to_string(&self.tab_path)
            .ok()
            .and_then(|x| RentalTab::from_str(x.trim()).ok())
            .unwrap_or_default()
    }

    pub fn save_rental_tab(&self, tab: RentalTab) -> Result<()> {
        debug!("saving rental tab {tab}");
        write_creating_parent(Path::new(&self.tab_path), tab.as_str())
            .wrap_err("Failed to store the selected tab")
    }

    pub fn config_file() -> PathBuf {
        let config_dir = std::env::var("EVRENT_CONFIG_DIR")
            .map_or_else(|_| evrent_common::utils::config_dir(), PathBuf::from);
        config_dir.join("config.toml")
    }

    pub fn build_default() -> Result<ConfigBuilder<DefaultState>> {
        let data_dir = evrent_common::utils::data_dir();
        let session_path = data_dir.join(SESSION_FILENAME);
        let tab_path = data_dir.join(TAB_FILENAME);
        let log_path = data_dir.join(LOG_FILENAME);

        Ok(Config::builder()
            .set_default("server_address", "http://127.0.0.1:8080/api")?
            .set_default("api_base_url", "http://127.0.0.1:8080")?
            .set_default("session_path", session_path.to_str())?
            .set_default("tab_path", tab_path.to_str())?
            .set_default("log_path", log_path.to_str())?
            .set_default("notifications", "log")?
            .set_default("deposit.car", 5_000_000)?
            .set_default("deposit.motorbike", 2_000_000)?)
    }

    /// Stacks the TOML file over `builder` and the `EVRENT_` environment over
    /// both.
    fn layered(
        builder: ConfigBuilder<DefaultState>,
        config_file: Option<&str>,
        env: Environment,
    ) -> ConfigBuilder<DefaultState> {
        let builder = match config_file {
            Some(path) => builder.add_source(ConfigFile::new(path, FileFormat::Toml)),
            None => builder,
        };
        builder.add_source(env)
    }

    pub fn new() -> Result<Self> {
        let data_dir = evrent_common::utils::data_dir();
        create_dir_all(&data_dir).wrap_err_with(|| format!("Failed to create dir {data_dir:?}"))?;

        let config_file = Self::config_file();
        if let Some(config_dir) = config_file.parent() {
            create_dir_all(config_dir)
                .wrap_err_with(|| format!("Failed to create dir {config_dir:?}"))?;
        }

        let path = if config_file.exists() {
            let path = config_file
                .to_str()
                .ok_or_else(|| eyre!("Config path is not valid utf-8: {config_file:?}"))?;
            Some(path)
        } else {
            let mut file = File::create(&config_file).wrap_err("Failed to create config file")?;
            file.write_all(EXAMPLE_CONFIG.as_bytes())
                .wrap_err("Failed to write default config file")?;
            None
        };

        let config_builder = Self::layered(Self::build_default()?, path, environment());
        let mut settings: Settings = config_builder
            .build()?
            .try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize {}", e))?;

        settings.session_path = expand_shell(&settings.session_path)?;
        settings.tab_path = expand_shell(&settings.tab_path)?;
        settings.log_path = expand_shell(&settings.log_path)?;

        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("evrent")
        .prefix_separator("_")
        .separator("__")
}

fn write_creating_parent(path: &Path, value: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs_err::create_dir_all(dir)?;
        }
    }
    fs_err::write(path, value)?;
    Ok(())
}

fn expand_shell(value: &str) -> Result<String> {
    Ok(shellexpand::full(value)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_in(dir: &Path) -> Settings {
        Settings::build_default()
            .unwrap()
            .set_override("session_path", dir.join("nested/session").to_str())
            .unwrap()
            .set_override("tab_path", dir.join("rental_tab").to_str())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_cover_deposits_and_notifications() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        assert_eq!(settings.notifications, NotificationMode::Log);
        assert_eq!(settings.deposit.car, 5_000_000);
        assert_eq!(settings.deposit.motorbike, 2_000_000);
    }

    #[test]
    fn session_is_trimmed_and_cleared() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        assert_eq!(settings.session(), None);

        settings.save_session("abc\n").unwrap();
        assert_eq!(settings.session().as_deref(), Some("abc"));

        settings.clear_session().unwrap();
        assert_eq!(settings.session(), None);
    }

    #[test]
    fn rental_tab_survives_and_falls_back_on_garbage() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(dir.path());
        assert_eq!(settings.rental_tab(), RentalTab::Handover);

        settings.save_rental_tab(RentalTab::Return).unwrap();
        assert_eq!(settings.rental_tab(), RentalTab::Return);

        fs_err::write(&settings.tab_path, "somewhere").unwrap();
        assert_eq!(settings.rental_tab(), RentalTab::Handover);
    }

    #[test]
    fn environment_overrides_the_config_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.toml");
        fs_err::write(
            &file,
            "server_address = \"http://file:8080/api\"\napi_base_url = \"http://file:8080\"\n",
        )
        .unwrap();

        let env = environment().source(Some(
            [("EVRENT_API_BASE_URL".to_string(), "http://env:9090".to_string())]
                .into_iter()
                .collect(),
        ));
        let settings: Settings =
            Settings::layered(Settings::build_default().unwrap(), file.to_str(), env)
                .build()
                .unwrap()
                .try_deserialize()
                .unwrap();

        assert_eq!(settings.api_base_url, "http://env:9090");
        assert_eq!(settings.server_address, "http://file:8080/api");
    }
}
