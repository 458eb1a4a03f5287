use evrent_client::api_client;
use evrent_client::settings::Settings;
use eyre::Result;

pub async fn run(settings: &Settings) -> Result<()> {
    let res = api_client::health_check(&settings.server_address).await?;
    println!("Server: {}", settings.server_address);
    println!("Status: {}", res.status);
    if !res.version.is_empty() {
        println!("Version: {}", res.version);
    }
    Ok(())
}
