use crate::command::{context, ensure_done, finish, parse_choice, print_table};
use clap::{Parser, Subcommand};
use evrent_client::domain::{VehicleStatus, VehicleType};
use evrent_client::forms::VehicleForm;
use evrent_client::pricing::format_vnd;
use evrent_client::screens::VehiclesScreen;
use evrent_client::settings::Settings;
use evrent_client::upload::Upload;
use evrent_client::utils::confirm;
use eyre::{eyre, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ListCmd {
    #[arg(long, short, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "all")]
    pub status: String,
    #[arg(long = "type", default_value = "all")]
    pub kind: String,
    #[arg(long, default_value = "all")]
    pub station: String,
}

#[derive(Parser, Debug)]
pub struct AddCmd {
    #[arg(long)]
    pub plate: String,
    #[arg(long)]
    pub brand: String,
    #[arg(long)]
    pub model: String,
    #[arg(long = "type", default_value = "car")]
    pub kind: VehicleType,
    #[arg(long, default_value_t = 4)]
    pub capacity: u32,
    /// Range on a full charge, in km
    #[arg(long)]
    pub range: u32,
    #[arg(long)]
    pub price_per_hour: u64,
    #[arg(long)]
    pub station: Option<String>,
    #[arg(long, default_value_t = 100)]
    pub battery: u8,
    #[arg(long, default_value_t = 0)]
    pub odo: u64,
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct EditCmd {
    pub id: String,
    #[arg(long)]
    pub status: Option<VehicleStatus>,
    #[arg(long)]
    pub price_per_hour: Option<u64>,
    #[arg(long)]
    pub station: Option<String>,
    #[arg(long)]
    pub battery: Option<u8>,
    #[arg(long)]
    pub odo: Option<u64>,
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    List(ListCmd),
    Add(AddCmd),
    Edit(EditCmd),
    Delete {
        id: String,
        /// Skip the confirmation
        #[arg(long, short)]
        yes: bool,
    },
}

fn read_image(path: Option<PathBuf>) -> Result<Option<Upload>> {
    path.map(|x| Upload::from_path(&x)).transpose()
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        let mut screen = VehiclesScreen::new(context(settings)?);
        screen.load().await;

        match self {
            Self::List(cmd) => {
                screen.search = cmd.search;
                screen.status = parse_choice(&cmd.status)?;
                screen.kind = parse_choice(&cmd.kind)?;
                screen.station = parse_choice(&cmd.station)?;

                let rows: Vec<Vec<String>> = screen
                    .visible()
                    .into_iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.license_plate.clone(),
                            format!("{} {}", x.brand, x.model),
                            x.kind.label().into(),
                            x.status.label().into(),
                            format!("{}%", x.battery_level),
                            format_vnd(x.price_per_hour),
                            screen.station_name(x).unwrap_or("-").into(),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "Biển số", "Xe", "Loại", "Trạng thái", "Pin", "Giá/giờ", "Trạm"],
                    &rows,
                );

                let counts = screen.counts();
                println!(
                    "\nTổng: {}  Sẵn sàng: {}  Đang thuê: {}  Bảo trì: {}  Đã đặt: {}",
                    counts.total, counts.available, counts.rented, counts.maintenance, counts.reserved
                );
                Ok(())
            }
            Self::Add(cmd) => {
                let form = VehicleForm {
                    license_plate: cmd.plate,
                    brand: cmd.brand,
                    model: cmd.model,
                    kind: cmd.kind,
                    status: None,
                    capacity: cmd.capacity,
                    range_per_full_charge: cmd.range,
                    price_per_hour: cmd.price_per_hour,
                    station_id: cmd.station,
                    battery_level: cmd.battery,
                    odo: cmd.odo,
                };
                let image = read_image(cmd.image)?;
                finish(screen.create(&form, image).await)
            }
            Self::Edit(cmd) => {
                let vehicle = screen
                    .find(&cmd.id)
                    .ok_or_else(|| eyre!("No vehicle with id {}", cmd.id))?;
                let form = VehicleForm {
                    license_plate: vehicle.license_plate.clone(),
                    brand: vehicle.brand.clone(),
                    model: vehicle.model.clone(),
                    kind: vehicle.kind,
                    status: Some(cmd.status.unwrap_or(vehicle.status)),
                    capacity: vehicle.capacity,
                    range_per_full_charge: vehicle.range_per_full_charge,
                    price_per_hour: cmd.price_per_hour.unwrap_or(vehicle.price_per_hour),
                    station_id: cmd
                        .station
                        .or_else(|| vehicle.station_id().map(String::from)),
                    battery_level: cmd.battery.unwrap_or(vehicle.battery_level),
                    odo: cmd.odo.unwrap_or(vehicle.odo),
                };
                let image = read_image(cmd.image)?;
                finish(screen.update(&cmd.id, &form, image).await)
            }
            Self::Delete { id, yes } => {
                if !yes && !confirm(&format!("Delete vehicle {id}?")) {
                    return Ok(());
                }
                ensure_done(screen.delete(&id).await)
            }
        }
    }
}
