use crate::command::{context, ensure_done, finish, format_time, parse_choice, parse_time, print_table};
use clap::{Parser, Subcommand};
use evrent_client::domain::violation::total_fines;
use evrent_client::domain::{Bill, PaymentMethod, RentalTab};
use evrent_client::forms::{PickupForm, ReturnForm, ViolationForm, WalkInForm};
use evrent_client::pricing::format_vnd;
use evrent_client::screens::{PaymentsScreen, RentalManagementScreen};
use evrent_client::settings::Settings;
use evrent_client::upload::{HandoverFiles, Upload};
use eyre::{bail, Result};
use time::OffsetDateTime;

/// Readings and files recorded when a vehicle changes hands.
#[derive(Parser, Debug)]
pub struct HandoverArgs {
    pub id: String,
    #[arg(long)]
    pub odo: u64,
    #[arg(long)]
    pub battery: u8,
    #[arg(long)]
    pub condition: String,
    #[arg(long)]
    pub notes: Option<String>,
    /// Path or data url
    #[arg(long)]
    pub photo: Option<String>,
    /// Path or data url
    #[arg(long)]
    pub staff_signature: Option<String>,
    /// Path or data url
    #[arg(long)]
    pub customer_signature: Option<String>,
}

impl HandoverArgs {
    fn files(&self) -> Result<HandoverFiles> {
        let read = |name: &str, value: &Option<String>| {
            value.as_deref().map(|x| Upload::from_arg(name, x)).transpose()
        };
        Ok(HandoverFiles {
            photo: read("photo", &self.photo)?,
            staff_signature: read("staff_signature", &self.staff_signature)?,
            customer_signature: read("customer_signature", &self.customer_signature)?,
        })
    }
}

#[derive(Parser, Debug)]
pub struct WalkInCmd {
    #[arg(long)]
    pub renter: String,
    #[arg(long)]
    pub vehicle: String,
    #[arg(long, value_parser = parse_time)]
    pub until: Option<OffsetDateTime>,
    #[arg(long)]
    pub deposit: u64,
    #[arg(long, default_value_t = 0)]
    pub insurance: u64,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Rentals of a desk tab. Defaults to the tab used last time.
    Rentals {
        #[arg(long)]
        tab: Option<RentalTab>,
        #[arg(long, short, default_value = "")]
        search: String,
    },
    /// Confirmed reservations waiting for check-in
    Queue {
        #[arg(long, short, default_value = "")]
        search: String,
    },
    /// Turn a reservation into a rental
    Checkin {
        id: String,
        /// Overrides the computed deposit
        #[arg(long)]
        deposit: Option<u64>,
    },
    Cancel {
        id: String,
        #[arg(long, default_value = "")]
        reason: String,
    },
    HoldDeposit {
        id: String,
    },
    Pickup(HandoverArgs),
    Return(HandoverArgs),
    Bill {
        id: String,
    },
    /// Record a violation, or list them with --list
    Violation {
        id: String,
        #[arg(long)]
        list: bool,
        #[arg(long, required_unless_present = "list")]
        description: Option<String>,
        #[arg(long, required_unless_present = "list")]
        fine: Option<u64>,
    },
    Pay {
        id: String,
        #[arg(long, default_value = "cash")]
        method: PaymentMethod,
    },
    WalkIn(WalkInCmd),
    /// Settlements waiting at the counter
    Payments {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        status: String,
    },
}

fn print_bill(bill: &Bill) {
    println!("Tiền thuê:     {}", format_vnd(bill.rental_cost));
    println!("Vi phạm:       {}", format_vnd(bill.violation_cost));
    println!("Bảo hiểm:      {}", format_vnd(bill.insurance));
    println!("Tiền cọc:      {}", format_vnd(bill.deposit_amount));
    println!("Tổng cộng:     {}", format_vnd(bill.total_cost));
    if let Some(due) = bill.amount_due {
        let label = if due < 0 { "Hoàn lại" } else { "Cần thanh toán" };
        println!("{label}: {}", format_vnd(due.unsigned_abs()));
    }
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        match self {
            Self::Payments { search, status } => payments(settings, search, &status).await,
            cmd => cmd.run_desk(settings).await,
        }
    }

    async fn run_desk(self, settings: &Settings) -> Result<()> {
        let mut screen = RentalManagementScreen::new(context(settings)?);
        screen.load().await;

        match self {
            Self::Rentals { tab, search } => {
                if let Some(tab) = tab {
                    screen.set_tab(tab);
                }
                screen.search = search;
                let now = OffsetDateTime::now_utc();

                println!("[{}]", screen.tab.label());
                let rows: Vec<Vec<String>> = screen
                    .tab_rentals()
                    .into_iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.renter_name().into(),
                            x.vehicle_label(),
                            x.status.label().into(),
                            x.deposit_status.label().into(),
                            format_time(x.start_time),
                            screen
                                .cost_preview(x, now)
                                .map(format_vnd)
                                .unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "Khách", "Xe", "Trạng thái", "Tiền cọc", "Bắt đầu", "Chi phí"],
                    &rows,
                );
                Ok(())
            }
            Self::Queue { search } => {
                screen.search = search;
                let rows: Vec<Vec<String>> = screen
                    .pending_check_ins()
                    .into_iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.renter_name().into(),
                            x.vehicle_label(),
                            format_time(Some(x.reserved_start_time)),
                            format_time(Some(x.reserved_end_time)),
                            screen
                                .deposit_preview(x)
                                .map(format_vnd)
                                .unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Khách", "Xe", "Từ", "Đến", "Tiền cọc"], &rows);
                Ok(())
            }
            Self::Checkin { id, deposit } => match screen.check_in(&id, deposit).await {
                Some(rental) => {
                    println!("{}", rental.id);
                    Ok(())
                }
                None => ensure_done(false),
            },
            Self::Cancel { id, reason } => ensure_done(screen.cancel_reservation(&id, &reason).await),
            Self::HoldDeposit { id } => ensure_done(screen.hold_deposit(&id).await),
            Self::Pickup(args) => {
                let files = args.files()?;
                let form = PickupForm {
                    odo: args.odo,
                    battery_level: args.battery,
                    condition: args.condition,
                    notes: args.notes,
                };
                finish(screen.confirm_pickup(&args.id, &form, files).await)
            }
            Self::Return(args) => {
                let files = args.files()?;
                let form = ReturnForm {
                    odo: args.odo,
                    battery_level: args.battery,
                    condition: args.condition,
                    notes: args.notes,
                    pickup_odo: None,
                };
                finish(screen.confirm_return(&args.id, &form, files).await)
            }
            Self::Bill { id } => match screen.calculate_bill(&id).await {
                Some(bill) => {
                    print_bill(&bill);
                    Ok(())
                }
                None => ensure_done(false),
            },
            Self::Violation {
                id,
                list,
                description,
                fine,
            } => {
                if !list {
                    let (Some(description), Some(fine)) = (description, fine) else {
                        bail!("--description and --fine are required");
                    };
                    let form = ViolationForm {
                        description,
                        fine_amount: fine,
                    };
                    finish(screen.add_violation(&id, &form).await)?;
                }

                if screen.violations.is_empty() {
                    screen.load_violations(&id).await;
                }
                let rows: Vec<Vec<String>> = screen
                    .violations
                    .iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.description.clone(),
                            format_vnd(x.fine_amount),
                            format_time(x.created_at),
                        ]
                    })
                    .collect();
                print_table(&["ID", "Mô tả", "Tiền phạt", "Thời gian"], &rows);
                println!("\nTổng tiền phạt: {}", format_vnd(total_fines(&screen.violations)));
                Ok(())
            }
            Self::Pay { id, method } => match screen.process_payment(&id, method).await {
                Some(receipt) => {
                    println!("{} {}", format_vnd(receipt.amount), receipt.status.label());
                    if let Some(url) = receipt.checkout_url {
                        println!("{url}");
                    }
                    Ok(())
                }
                None => ensure_done(false),
            },
            Self::WalkIn(cmd) => {
                let form = WalkInForm {
                    renter_id: cmd.renter,
                    vehicle_id: cmd.vehicle,
                    expected_end_time: cmd.until,
                    deposit_amount: cmd.deposit,
                    insurance: cmd.insurance,
                };
                finish(screen.create_walk_in(&form).await)
            }
            Self::Payments { search, status } => payments(settings, search, &status).await,
        }
    }
}

async fn payments(settings: &Settings, search: String, status: &str) -> Result<()> {
    let mut screen = PaymentsScreen::new(context(settings)?);
    screen.load().await;
    screen.search = search;
    screen.status = parse_choice(status)?;

    let rows: Vec<Vec<String>> = screen
        .visible()
        .into_iter()
        .map(|x| {
            vec![
                x.rental_id,
                x.renter_name,
                x.vehicle_label,
                format_vnd(x.amount),
                x.method.map(|m| m.label()).unwrap_or("-").into(),
                x.status.label().into(),
            ]
        })
        .collect();
    print_table(
        &["Thuê xe", "Khách", "Xe", "Số tiền", "Phương thức", "Trạng thái"],
        &rows,
    );
    println!("\nChưa thanh toán: {}", format_vnd(screen.outstanding()));
    Ok(())
}
