use crate::command::{context, finish, parse_choice, print_table};
use clap::{Parser, Subcommand};
use evrent_client::domain::StationStatus;
use evrent_client::forms::StationForm;
use evrent_client::screens::StationsScreen;
use evrent_client::settings::Settings;
use eyre::{eyre, Result};

#[derive(Parser, Debug)]
pub struct AddCmd {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub address: String,
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
    #[arg(long, default_value = "active")]
    pub status: StationStatus,
}

#[derive(Parser, Debug)]
pub struct EditCmd {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub status: Option<StationStatus>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    List {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: String,
    },
    Add(AddCmd),
    Edit(EditCmd),
    /// Staff assigned to a station
    Staff { id: String },
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        let mut screen = StationsScreen::new(context(settings)?);
        screen.load().await;

        match self {
            Self::List { search, status } => {
                screen.search = search;
                screen.status = parse_choice(&status)?;

                let rows: Vec<Vec<String>> = screen
                    .visible()
                    .into_iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.name.clone(),
                            x.address.clone(),
                            format!("{:.5}, {:.5}", x.latitude, x.longitude),
                            x.status.label().into(),
                            x.staff.len().to_string(),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "Tên trạm", "Địa chỉ", "Tọa độ", "Trạng thái", "Nhân viên"],
                    &rows,
                );
                Ok(())
            }
            Self::Add(cmd) => {
                let form = StationForm {
                    name: cmd.name,
                    address: cmd.address,
                    latitude: cmd.lat,
                    longitude: cmd.lng,
                    status: cmd.status,
                };
                finish(screen.create(&form).await)
            }
            Self::Edit(cmd) => {
                let station = screen
                    .stations
                    .iter()
                    .find(|x| x.id == cmd.id)
                    .ok_or_else(|| eyre!("No station with id {}", cmd.id))?;
                let form = StationForm {
                    name: cmd.name.unwrap_or_else(|| station.name.clone()),
                    address: cmd.address.unwrap_or_else(|| station.address.clone()),
                    latitude: station.latitude,
                    longitude: station.longitude,
                    status: cmd.status.unwrap_or(station.status),
                };
                finish(screen.update(&cmd.id, &form).await)
            }
            Self::Staff { id } => {
                screen.load_staff(&id).await;
                let rows: Vec<Vec<String>> = screen
                    .staff
                    .iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.full_name.clone(),
                            x.email.clone(),
                            x.phone.clone(),
                            x.status_label().into(),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Họ tên", "Email", "SĐT", "Trạng thái"], &rows);
                Ok(())
            }
        }
    }
}
