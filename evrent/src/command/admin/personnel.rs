use crate::command::{context, ensure_done, finish, parse_choice, print_table};
use clap::{Parser, Subcommand};
use evrent_client::domain::Role;
use evrent_client::forms::{CustomerUpdateForm, PersonnelForm};
use evrent_client::screens::PersonnelScreen;
use evrent_client::settings::Settings;
use evrent_client::utils::read_input_hidden;
use eyre::{eyre, Result};

#[derive(Parser, Debug)]
pub struct AddCmd {
    #[arg(long)]
    pub full_name: String,
    #[arg(long, short)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    /// Prompted for when missing
    #[arg(long, short)]
    pub password: Option<String>,
    #[arg(long, default_value = "staff")]
    pub role: Role,
    #[arg(long)]
    pub station: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListCmd {
    #[arg(long, short, default_value = "")]
    pub search: String,
    /// true, false or all
    #[arg(long, default_value = "all")]
    pub active: String,
    #[arg(long, default_value = "all")]
    pub station: String,
}

#[derive(Parser, Debug)]
pub struct EditCmd {
    pub id: String,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    Add(AddCmd),
    List(ListCmd),
    Edit(EditCmd),
    /// Lock or unlock an account
    Toggle { id: String },
    /// Assign a staff member to a station
    Assign { id: String, station: String },
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        let mut screen = PersonnelScreen::new(context(settings)?);
        screen.load().await;

        match self {
            Self::Add(cmd) => {
                let form = PersonnelForm {
                    full_name: cmd.full_name,
                    email: cmd.email,
                    phone: cmd.phone,
                    password: cmd
                        .password
                        .unwrap_or_else(|| read_input_hidden("password")),
                    role: cmd.role,
                    station_id: cmd.station,
                };
                finish(screen.create(&form).await)
            }
            Self::List(cmd) => {
                screen.search = cmd.search;
                screen.status = parse_choice(&cmd.active)?;
                screen.station = parse_choice(&cmd.station)?;

                let rows: Vec<Vec<String>> = screen
                    .visible()
                    .into_iter()
                    .map(|x| {
                        let station = x
                            .station_id
                            .as_deref()
                            .map(|id| screen.station_name(id).unwrap_or(id).to_string())
                            .unwrap_or_else(|| "-".into());
                        vec![
                            x.id.clone(),
                            x.full_name.clone(),
                            x.email.clone(),
                            x.phone.clone(),
                            x.role.label().into(),
                            station,
                            x.status_label().into(),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "Họ tên", "Email", "SĐT", "Vai trò", "Trạm", "Trạng thái"],
                    &rows,
                );
                Ok(())
            }
            Self::Edit(cmd) => {
                let user = screen
                    .users
                    .iter()
                    .find(|x| x.id == cmd.id)
                    .ok_or_else(|| eyre!("No account with id {}", cmd.id))?;
                let mut form = CustomerUpdateForm::from(user);
                form.full_name = cmd.full_name.unwrap_or(form.full_name);
                form.email = cmd.email.unwrap_or(form.email);
                form.phone = cmd.phone.unwrap_or(form.phone);
                finish(screen.update(&cmd.id, &form).await)
            }
            Self::Toggle { id } => ensure_done(screen.toggle_status(&id).await),
            Self::Assign { id, station } => ensure_done(screen.assign_station(&id, &station).await),
        }
    }
}
