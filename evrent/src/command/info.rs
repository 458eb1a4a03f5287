use evrent_client::settings::Settings;

use crate::VERSION;

pub fn run(settings: &Settings) {
    let env_config_dir = std::env::var("EVRENT_CONFIG_DIR");

    let vars = format!(
        "VARS:\nEVRENT_CONFIG_DIR = {:?}",
        env_config_dir.unwrap_or("None".into())
    );
    println!("{vars}\n");

    let mut paths = String::from("PATHS:\n");
    paths.push_str(&format!("config_path: {:?}\n", Settings::config_file()));
    paths.push_str(&format!("session_path: {:?}\n", settings.session_path));
    paths.push_str(&format!("tab_path: {:?}\n", settings.tab_path));
    paths.push_str(&format!("log_path: {:?}", settings.log_path));
    println!("{paths}\n");

    println!("SERVER:");
    println!("Address: {}", settings.server_address);
    println!("Assets: {}", settings.api_base_url);
    println!(
        "Auth: {}",
        if settings.session().is_some() {
            "Logged in"
        } else {
            "Unauthenticated"
        }
    );
    println!("Staff tab: {}", settings.rental_tab().label());

    println!();
    println!("Version: {VERSION}");
}
