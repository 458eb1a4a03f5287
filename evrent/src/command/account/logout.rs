use evrent_client::api_client::ApiClient;
use evrent_client::settings::Settings;
use eyre::Result;
use tracing::warn;

pub async fn run(settings: &Settings) -> Result<()> {
    let Some(session) = settings.session() else {
        println!("You are not logged in.");
        return Ok(());
    };

    // The local session is dropped even when the backend cannot be told.
    let api = ApiClient::new(&settings.server_address, Some(&session))?;
    if let Err(err) = api.logout().await {
        warn!("Failed to end the session on the server: {err}");
    }
    settings.clear_session()?;

    println!("Logged out.");
    Ok(())
}
