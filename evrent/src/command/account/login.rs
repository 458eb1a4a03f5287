use clap::Parser;
use evrent_client::api_client;
use evrent_client::forms::{check, LoginForm};
use evrent_client::settings::Settings;
use evrent_client::utils::{read_input, read_input_hidden};
use eyre::{bail, Result};

#[derive(Parser, Debug)]
pub struct Cmd {
    #[arg(long, short)]
    pub email: Option<String>,
    #[arg(long, short)]
    pub password: Option<String>,
}

impl Cmd {
    pub async fn run(self, settings: &Settings) -> Result<()> {
        if settings.session().is_some() {
            println!("You are already logged in.");
            return Ok(());
        }

        let form = LoginForm {
            email: self.email.unwrap_or_else(|| read_input("email")),
            password: self
                .password
                .unwrap_or_else(|| read_input_hidden("password")),
        };
        if let Err(errors) = check(&form) {
            for err in &errors {
                eprintln!("  {err}");
            }
            bail!("Invalid credentials");
        }

        let res = api_client::login(&settings.server_address, &form.email, &form.password).await?;
        settings.save_session(&res.token)?;

        println!(
            "Logged in as {} ({})",
            res.user.full_name,
            res.user.role.label()
        );

        Ok(())
    }
}
