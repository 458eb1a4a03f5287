use crate::command::{context, ensure_done, finish, format_time, parse_choice, parse_time, print_table};
use clap::{Parser, Subcommand};
use evrent_client::forms::ReservationForm;
use evrent_client::pricing::format_vnd;
use evrent_client::screens::{RentalsScreen, ReservationsScreen};
use evrent_client::settings::Settings;
use eyre::{bail, Result};
use time::OffsetDateTime;

#[derive(Parser, Debug)]
pub struct ReserveArgs {
    #[arg(long)]
    pub vehicle: String,
    #[arg(long, value_parser = parse_time)]
    pub from: OffsetDateTime,
    #[arg(long, value_parser = parse_time)]
    pub to: OffsetDateTime,
    #[arg(long, default_value_t = 0)]
    pub insurance: u64,
}

impl ReserveArgs {
    fn form(self) -> ReservationForm {
        ReservationForm {
            vehicle_id: self.vehicle,
            reserved_start_time: self.from,
            reserved_end_time: self.to,
            insurance: self.insurance,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    Reservations {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Vehicles open for booking
    Vehicles,
    /// Price preview without booking
    Quote(ReserveArgs),
    Reserve(ReserveArgs),
    Cancel {
        id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    Rentals {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: String,
        /// Show one rental in detail
        #[arg(long)]
        open: Option<String>,
    },
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Rentals {
                search,
                status,
                open,
            } => {
                let mut screen = RentalsScreen::new(context(settings)?);
                rentals(&mut screen, search, &status, open).await
            }
            cmd => cmd.run_reservations(settings).await,
        }
    }

    async fn run_reservations(self, settings: &Settings) -> Result<()> {
        let mut screen = ReservationsScreen::new(context(settings)?);
        screen.load().await;

        match self {
            Self::Reservations { search, status } => {
                screen.search = search;
                screen.status = parse_choice(&status)?;

                let rows: Vec<Vec<String>> = screen
                    .visible()
                    .into_iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.vehicle_label(),
                            format_time(Some(x.reserved_start_time)),
                            format_time(Some(x.reserved_end_time)),
                            x.status.label().into(),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Xe", "Từ", "Đến", "Trạng thái"], &rows);
                Ok(())
            }
            Self::Vehicles => {
                let rows: Vec<Vec<String>> = screen
                    .vehicles
                    .iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.display_name(),
                            x.kind.label().into(),
                            format_vnd(x.price_per_hour),
                            x.station_name().unwrap_or("-").into(),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Xe", "Loại", "Giá/giờ", "Trạm"], &rows);
                Ok(())
            }
            Self::Quote(args) => {
                let form = args.form();
                let Some(quote) = screen.quote(&form) else {
                    bail!("Vehicle {} is not available for booking", form.vehicle_id);
                };
                println!("Số giờ:    {}", quote.hours);
                println!("Tiền thuê: {}", format_vnd(quote.rental_cost));
                println!("Bảo hiểm:  {}", format_vnd(quote.insurance));
                println!("Tổng:      {}", format_vnd(quote.total));
                Ok(())
            }
            Self::Reserve(args) => finish(screen.create(&args.form()).await),
            Self::Cancel { id, reason } => ensure_done(screen.cancel(&id, &reason).await),
            Self::Rentals {
                search,
                status,
                open,
            } => {
                let mut screen = RentalsScreen::new(context(settings)?);
                rentals(&mut screen, search, &status, open).await
            }
        }
    }
}

async fn rentals(
    screen: &mut RentalsScreen,
    search: String,
    status: &str,
    open: Option<String>,
) -> Result<()> {
    let now = OffsetDateTime::now_utc();

    if let Some(id) = open {
        let Some(rental) = screen.open(&id).await else {
            return ensure_done(false);
        };
        let rental = rental.clone();
        println!("Mã thuê:     {}", rental.id);
        println!("Xe:          {}", rental.vehicle_label());
        println!("Trạng thái:  {}", rental.status.label());
        println!("Bắt đầu:     {}", format_time(rental.start_time));
        println!("Kết thúc:    {}", format_time(rental.end_time));
        println!("Tiền cọc:    {} ({})", format_vnd(rental.deposit_amount), rental.deposit_status.label());
        if let Some(distance) = rental.total_distance {
            println!("Quãng đường: {distance} km");
        }
        if let Some(cost) = screen.cost_preview(&rental, now) {
            println!("Chi phí:     {}", format_vnd(cost));
        }
        return Ok(());
    }

    screen.load().await;
    screen.search = search;
    screen.status = parse_choice(status)?;

    let rows: Vec<Vec<String>> = screen
        .visible()
        .into_iter()
        .map(|x| {
            vec![
                x.id.clone(),
                x.vehicle_label(),
                x.status.label().into(),
                format_time(x.start_time),
                format_time(x.end_time),
                screen
                    .cost_preview(x, now)
                    .map(format_vnd)
                    .unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    print_table(&["ID", "Xe", "Trạng thái", "Bắt đầu", "Kết thúc", "Chi phí"], &rows);
    Ok(())
}
