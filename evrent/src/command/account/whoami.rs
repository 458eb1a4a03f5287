use evrent_client::settings::Settings;
use eyre::Result;

use crate::command::context;

pub async fn run(settings: &Settings) -> Result<()> {
    let ctx = context(settings)?;
    let user = ctx.api.me().await?;

    println!("Name: {}", user.full_name);
    println!("Email: {}", user.email);
    println!("Phone: {}", user.phone);
    println!("Role: {}", user.role.label());
    println!("Status: {}", user.status_label());
    if let Some(station) = &user.station_id {
        println!("Station: {station}");
    }
    Ok(())
}
