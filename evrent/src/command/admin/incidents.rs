use crate::command::{context, ensure_done, finish, format_time, parse_choice, print_table};
use clap::{Parser, Subcommand};
use evrent_client::domain::{IncidentStatus, Severity};
use evrent_client::forms::IncidentForm;
use evrent_client::pricing::format_vnd;
use evrent_client::screens::MonitoringScreen;
use evrent_client::settings::Settings;
use eyre::Result;

#[derive(Parser, Debug)]
pub struct ReportCmd {
    #[arg(long)]
    pub description: String,
    #[arg(long, default_value = "medium")]
    pub severity: Severity,
    #[arg(long)]
    pub rental: Option<String>,
    #[arg(long)]
    pub vehicle: Option<String>,
    #[arg(long)]
    pub station: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    List {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        severity: String,
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Move an incident to another status, resolved by default
    Resolve {
        id: String,
        #[arg(long, default_value = "resolved")]
        status: IncidentStatus,
    },
    Report(ReportCmd),
    /// Fleet and station overview
    Overview,
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        let mut screen = MonitoringScreen::new(context(settings)?);
        screen.load().await;

        match self {
            Self::List {
                search,
                severity,
                status,
            } => {
                screen.search = search;
                screen.severity = parse_choice(&severity)?;
                screen.status = parse_choice(&status)?;

                let rows: Vec<Vec<String>> = screen
                    .visible_incidents()
                    .into_iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.severity.label().into(),
                            x.status.label().into(),
                            x.description.clone(),
                            format_time(x.created_at),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Mức độ", "Trạng thái", "Mô tả", "Thời gian"], &rows);
                Ok(())
            }
            Self::Resolve { id, status } => ensure_done(screen.update_incident(&id, status).await),
            Self::Report(cmd) => {
                let form = IncidentForm {
                    rental_id: cmd.rental,
                    vehicle_id: cmd.vehicle,
                    station_id: cmd.station,
                    description: cmd.description,
                    severity: cmd.severity,
                };
                finish(screen.report_incident(&form).await)
            }
            Self::Overview => {
                let stats = &screen.stats;
                println!(
                    "Xe: {} (sẵn sàng {}, đang thuê {}, bảo trì {})",
                    stats.total_vehicles,
                    stats.available_vehicles,
                    stats.rented_vehicles,
                    stats.maintenance_vehicles
                );
                println!(
                    "Trạm: {}  Đang thuê: {}  Khách thuê: {}  Sự cố mở: {}",
                    stats.total_stations,
                    stats.active_rentals,
                    stats.total_renters,
                    stats.open_incidents
                );
                println!("Doanh thu hôm nay: {}\n", format_vnd(stats.revenue_today));

                let rows: Vec<Vec<String>> = screen
                    .availability()
                    .into_iter()
                    .map(|x| {
                        vec![
                            x.name,
                            x.total.to_string(),
                            x.available.to_string(),
                            x.rented.to_string(),
                            x.maintenance.to_string(),
                        ]
                    })
                    .collect();
                print_table(
                    &["Trạm", "Tổng", "Sẵn sàng", "Đang thuê", "Bảo trì"],
                    &rows,
                );
                Ok(())
            }
        }
    }
}
