//! The pages of the dashboard. Each page wraps one screen from the client
//! crate and turns it into rows, filters and key actions.

use super::prompt::ConfirmKind;
use crate::command::format_time;
use evrent_client::domain::{
    IncidentStatus, PaymentMethod, PaymentStatus, RentalStatus, RentalTab, ReservationStatus,
    Role, Severity, StationStatus, VehicleStatus,
};
use evrent_client::pricing::format_vnd;
use evrent_client::screens::{
    CustomersScreen, MonitoringScreen, PaymentsScreen, PersonnelScreen, RentalManagementScreen,
    RentalsScreen, ReservationsScreen, ScreenContext, StationsScreen, VehiclesScreen,
};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Route {
    Customers,
    Personnel,
    Vehicles,
    Stations,
    Monitoring,
    RentalDesk,
    Payments,
    Reservations,
    Rentals,
}

impl Route {
    /// Pages reachable by a role, in tab order.
    pub(super) fn for_role(role: Role) -> &'static [Route] {
        match role {
            Role::Admin => &[
                Route::Customers,
                Route::Personnel,
                Route::Vehicles,
                Route::Stations,
                Route::Monitoring,
            ],
            Role::Staff => &[Route::RentalDesk, Route::Payments],
            Role::Renter => &[Route::Reservations, Route::Rentals],
        }
    }

    pub(super) fn label(self) -> &'static str {
        match self {
            Route::Customers => "Khách hàng",
            Route::Personnel => "Nhân sự",
            Route::Vehicles => "Xe",
            Route::Stations => "Trạm",
            Route::Monitoring => "Giám sát",
            Route::RentalDesk => "Quản lý thuê xe",
            Route::Payments => "Thanh toán",
            Route::Reservations => "Đặt xe",
            Route::Rentals => "Lịch sử thuê",
        }
    }
}

/// Rows on the staff desk are either reservations waiting for check-in or
/// rentals. The other pages only have one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RowKind {
    Item,
    Reservation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Row {
    pub(super) id: String,
    pub(super) kind: RowKind,
    pub(super) cells: Vec<String>,
}

impl Row {
    fn item(id: &str, cells: Vec<String>) -> Self {
        Self {
            id: id.into(),
            kind: RowKind::Item,
            cells,
        }
    }
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".into())
}

pub(super) enum View {
    Customers(CustomersScreen),
    Personnel(PersonnelScreen),
    Vehicles(VehiclesScreen),
    Stations(StationsScreen),
    Monitoring(MonitoringScreen),
    RentalDesk(RentalManagementScreen),
    Payments(PaymentsScreen),
    Reservations(ReservationsScreen),
    Rentals(RentalsScreen),
}

impl View {
    pub(super) fn open(route: Route, ctx: ScreenContext) -> Self {
        match route {
            Route::Customers => View::Customers(CustomersScreen::new(ctx)),
            Route::Personnel => View::Personnel(PersonnelScreen::new(ctx)),
            Route::Vehicles => View::Vehicles(VehiclesScreen::new(ctx)),
            Route::Stations => View::Stations(StationsScreen::new(ctx)),
            Route::Monitoring => View::Monitoring(MonitoringScreen::new(ctx)),
            Route::RentalDesk => View::RentalDesk(RentalManagementScreen::new(ctx)),
            Route::Payments => View::Payments(PaymentsScreen::new(ctx)),
            Route::Reservations => View::Reservations(ReservationsScreen::new(ctx)),
            Route::Rentals => View::Rentals(RentalsScreen::new(ctx)),
        }
    }

    pub(super) async fn load(&mut self) {
        match self {
            View::Customers(s) => s.load().await,
            View::Personnel(s) => s.load().await,
            View::Vehicles(s) => s.load().await,
            View::Stations(s) => s.load().await,
            View::Monitoring(s) => s.load().await,
            View::RentalDesk(s) => s.load().await,
            View::Payments(s) => s.load().await,
            View::Reservations(s) => s.load().await,
            View::Rentals(s) => s.load().await,
        }
    }

    fn search_mut(&mut self) -> &mut String {
        match self {
            View::Customers(s) => &mut s.search,
            View::Personnel(s) => &mut s.search,
            View::Vehicles(s) => &mut s.search,
            View::Stations(s) => &mut s.search,
            View::Monitoring(s) => &mut s.search,
            View::RentalDesk(s) => &mut s.search,
            View::Payments(s) => &mut s.search,
            View::Reservations(s) => &mut s.search,
            View::Rentals(s) => &mut s.search,
        }
    }

    pub(super) fn search(&self) -> &str {
        match self {
            View::Customers(s) => &s.search,
            View::Personnel(s) => &s.search,
            View::Vehicles(s) => &s.search,
            View::Stations(s) => &s.search,
            View::Monitoring(s) => &s.search,
            View::RentalDesk(s) => &s.search,
            View::Payments(s) => &s.search,
            View::Reservations(s) => &s.search,
            View::Rentals(s) => &s.search,
        }
    }

    pub(super) fn set_search(&mut self, value: &str) {
        let search = self.search_mut();
        search.clear();
        search.push_str(value);
    }

    /// Moves the main dropdown filter of the page to its next value.
    pub(super) fn cycle_filter(&mut self) {
        match self {
            View::Customers(s) => s.verified = s.verified.cycle(&[true, false]),
            View::Personnel(s) => s.status = s.status.cycle(&[true, false]),
            View::Vehicles(s) => s.status = s.status.cycle(VehicleStatus::ALL),
            View::Stations(s) => s.status = s.status.cycle(StationStatus::ALL),
            View::Monitoring(s) => s.severity = s.severity.cycle(Severity::ALL),
            View::RentalDesk(s) => s.next_tab(),
            View::Payments(s) => s.status = s.status.cycle(PaymentStatus::ALL),
            View::Reservations(s) => s.status = s.status.cycle(ReservationStatus::ALL),
            View::Rentals(s) => s.status = s.status.cycle(RentalStatus::ALL),
        }
    }

    pub(super) fn filter_label(&self) -> String {
        match self {
            View::Customers(s) => format!("xác minh: {}", s.verified.label()),
            View::Personnel(s) => format!("hoạt động: {}", s.status.label()),
            View::Vehicles(s) => format!("trạng thái: {}", s.status.label()),
            View::Stations(s) => format!("trạng thái: {}", s.status.label()),
            View::Monitoring(s) => format!("mức độ: {}", s.severity.label()),
            View::RentalDesk(s) => RentalTab::ALL
                .iter()
                .map(|x| {
                    if *x == s.tab {
                        format!("[{}]", x.label())
                    } else {
                        x.label().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
            View::Payments(s) => format!("trạng thái: {}", s.status.label()),
            View::Reservations(s) => format!("trạng thái: {}", s.status.label()),
            View::Rentals(s) => format!("trạng thái: {}", s.status.label()),
        }
    }

    /// Summary figures shown above the table.
    pub(super) fn summary(&self) -> String {
        match self {
            View::Customers(s) => {
                let stats = s.stats();
                format!(
                    "Tổng {}  Đã xác minh {}  Hoạt động {}  Đã khóa {}",
                    stats.total, stats.verified, stats.active, stats.locked
                )
            }
            View::Personnel(s) => format!("Tổng {}", s.users.len()),
            View::Vehicles(s) => {
                let counts = s.counts();
                format!(
                    "Tổng {}  Sẵn sàng {}  Đang thuê {}  Bảo trì {}  Đã đặt {}",
                    counts.total, counts.available, counts.rented, counts.maintenance, counts.reserved
                )
            }
            View::Stations(s) => format!("Tổng {}", s.stations.len()),
            View::Monitoring(s) => format!(
                "Xe {}  Đang thuê {}  Sự cố mở {}  Doanh thu hôm nay {}",
                s.stats.total_vehicles,
                s.stats.active_rentals,
                s.stats.open_incidents,
                format_vnd(s.stats.revenue_today)
            ),
            View::RentalDesk(s) => format!(
                "Chờ nhận xe {}  Đang thuê {}",
                s.pending_check_ins().len(),
                s.rentals
                    .iter()
                    .filter(|x| x.status == RentalStatus::InUse)
                    .count()
            ),
            View::Payments(s) => format!("Chưa thanh toán {}", format_vnd(s.outstanding())),
            View::Reservations(s) => format!("Xe sẵn sàng {}", s.vehicles.len()),
            View::Rentals(s) => format!("Tổng {}", s.rentals.len()),
        }
    }

    pub(super) fn headers(&self) -> &'static [&'static str] {
        match self {
            View::Customers(_) => &["Họ tên", "Email", "SĐT", "Giấy tờ", "Trạng thái"],
            View::Personnel(_) => &["Họ tên", "Email", "Vai trò", "Trạm", "Trạng thái"],
            View::Vehicles(_) => &["Biển số", "Xe", "Loại", "Trạng thái", "Pin", "Giá/giờ", "Trạm"],
            View::Stations(_) => &["Tên trạm", "Địa chỉ", "Trạng thái", "Nhân viên"],
            View::Monitoring(_) => &["Mức độ", "Trạng thái", "Mô tả", "Thời gian"],
            View::RentalDesk(_) => &["Mã", "Khách", "Xe", "Trạng thái", "Tiền cọc", "Chi phí"],
            View::Payments(_) => &["Thuê xe", "Khách", "Xe", "Số tiền", "Trạng thái"],
            View::Reservations(_) => &["Xe", "Từ", "Đến", "Trạng thái"],
            View::Rentals(_) => &["Xe", "Trạng thái", "Bắt đầu", "Kết thúc", "Chi phí"],
        }
    }

    pub(super) fn rows(&self, now: OffsetDateTime) -> Vec<Row> {
        match self {
            View::Customers(s) => s
                .visible()
                .into_iter()
                .map(|x| {
                    let verified = if x.is_verified() {
                        "Đã xác minh"
                    } else {
                        "Chưa xác minh"
                    };
                    Row::item(
                        &x.id,
                        vec![
                            x.full_name.clone(),
                            x.email.clone(),
                            x.phone.clone(),
                            verified.into(),
                            x.status_label().into(),
                        ],
                    )
                })
                .collect(),
            View::Personnel(s) => s
                .visible()
                .into_iter()
                .map(|x| {
                    let station = x.station_id.as_deref().and_then(|id| s.station_name(id));
                    Row::item(
                        &x.id,
                        vec![
                            x.full_name.clone(),
                            x.email.clone(),
                            x.role.label().into(),
                            station.unwrap_or("-").into(),
                            x.status_label().into(),
                        ],
                    )
                })
                .collect(),
            View::Vehicles(s) => s
                .visible()
                .into_iter()
                .map(|x| {
                    Row::item(
                        &x.id,
                        vec![
                            x.license_plate.clone(),
                            x.display_name(),
                            x.kind.label().into(),
                            x.status.label().into(),
                            format!("{}%", x.battery_level),
                            format_vnd(x.price_per_hour),
                            s.station_name(x).unwrap_or("-").into(),
                        ],
                    )
                })
                .collect(),
            View::Stations(s) => s
                .visible()
                .into_iter()
                .map(|x| {
                    Row::item(
                        &x.id,
                        vec![
                            x.name.clone(),
                            x.address.clone(),
                            x.status.label().into(),
                            x.staff.len().to_string(),
                        ],
                    )
                })
                .collect(),
            View::Monitoring(s) => s
                .visible_incidents()
                .into_iter()
                .map(|x| {
                    Row::item(
                        &x.id,
                        vec![
                            x.severity.label().into(),
                            x.status.label().into(),
                            x.description.clone(),
                            format_time(x.created_at),
                        ],
                    )
                })
                .collect(),
            View::RentalDesk(s) => {
                let mut rows = Vec::new();
                if s.tab == RentalTab::Handover {
                    rows.extend(s.pending_check_ins().into_iter().map(|x| Row {
                        id: x.id.clone(),
                        kind: RowKind::Reservation,
                        cells: vec![
                            x.id.clone(),
                            x.renter_name().into(),
                            x.vehicle_label(),
                            x.status.label().into(),
                            or_dash(s.deposit_preview(x).map(format_vnd)),
                            "-".into(),
                        ],
                    }));
                }
                rows.extend(s.tab_rentals().into_iter().map(|x| {
                    Row::item(
                        &x.id,
                        vec![
                            x.id.clone(),
                            x.renter_name().into(),
                            x.vehicle_label(),
                            x.status.label().into(),
                            format!(
                                "{} ({})",
                                format_vnd(x.deposit_amount),
                                x.deposit_status.label()
                            ),
                            or_dash(s.cost_preview(x, now).map(format_vnd)),
                        ],
                    )
                }));
                rows
            }
            View::Payments(s) => s
                .visible()
                .into_iter()
                .map(|x| {
                    Row::item(
                        &x.rental_id,
                        vec![
                            x.rental_id.clone(),
                            x.renter_name,
                            x.vehicle_label,
                            format_vnd(x.amount),
                            x.status.label().into(),
                        ],
                    )
                })
                .collect(),
            View::Reservations(s) => s
                .visible()
                .into_iter()
                .map(|x| {
                    Row::item(
                        &x.id,
                        vec![
                            x.vehicle_label(),
                            format_time(Some(x.reserved_start_time)),
                            format_time(Some(x.reserved_end_time)),
                            x.status.label().into(),
                        ],
                    )
                })
                .collect(),
            View::Rentals(s) => s
                .visible()
                .into_iter()
                .map(|x| {
                    Row::item(
                        &x.id,
                        vec![
                            x.vehicle_label(),
                            x.status.label().into(),
                            format_time(x.start_time),
                            format_time(x.end_time),
                            or_dash(s.cost_preview(x, now).map(format_vnd)),
                        ],
                    )
                })
                .collect(),
        }
    }

    /// `t`: lock or unlock an account, or move an incident forward.
    pub(super) async fn toggle(&mut self, id: &str) {
        match self {
            View::Customers(s) => {
                s.toggle_status(id).await;
            }
            View::Personnel(s) => {
                s.toggle_status(id).await;
            }
            View::Monitoring(s) => {
                let next = s
                    .incidents
                    .iter()
                    .find(|x| x.id == id)
                    .map(|x| match x.status {
                        IncidentStatus::Pending => IncidentStatus::InReview,
                        _ => IncidentStatus::Resolved,
                    });
                if let Some(next) = next {
                    s.update_incident(id, next).await;
                }
            }
            _ => {}
        }
    }

    /// `v`: verify a renter's documents.
    pub(super) async fn verify(&mut self, id: &str) {
        if let View::Customers(s) = self {
            s.verify(id).await;
        }
    }

    /// `d`: the question to ask before a destructive action on the row.
    pub(super) fn delete_request(&self, row: &Row) -> Option<ConfirmKind> {
        match self {
            View::Vehicles(_) => Some(ConfirmKind::DeleteVehicle(row.id.clone())),
            View::Reservations(_) => Some(ConfirmKind::CancelReservation(row.id.clone())),
            View::RentalDesk(_) if row.kind == RowKind::Reservation => {
                Some(ConfirmKind::CancelReservation(row.id.clone()))
            }
            _ => None,
        }
    }

    /// `p`: cash payment for a rental waiting at the counter.
    pub(super) fn payment_request(&self, row: &Row) -> Option<ConfirmKind> {
        match self {
            View::Payments(_) => Some(ConfirmKind::Pay(row.id.clone())),
            View::RentalDesk(s) if s.tab == RentalTab::Return => {
                Some(ConfirmKind::Pay(row.id.clone()))
            }
            _ => None,
        }
    }

    pub(super) async fn confirm(&mut self, kind: ConfirmKind) {
        match (self, kind) {
            (View::Vehicles(s), ConfirmKind::DeleteVehicle(id)) => {
                s.delete(&id).await;
            }
            (View::Reservations(s), ConfirmKind::CancelReservation(id)) => {
                s.cancel(&id, "").await;
            }
            (View::RentalDesk(s), ConfirmKind::CancelReservation(id)) => {
                s.cancel_reservation(&id, "").await;
            }
            (View::RentalDesk(s), ConfirmKind::Pay(id)) => {
                s.process_payment(&id, PaymentMethod::Cash).await;
            }
            (View::Payments(s), ConfirmKind::Pay(id)) => {
                s.pay(&id, PaymentMethod::Cash).await;
            }
            _ => {}
        }
    }

    /// `Enter`: runs the main action of the row and returns lines for the
    /// detail panel, if the action has anything to show.
    pub(super) async fn enter(&mut self, row: &Row, now: OffsetDateTime) -> Option<Vec<String>> {
        match self {
            View::Customers(s) => {
                let user = s.find(&row.id)?;
                Some(vec![
                    format!("Họ tên:   {}", user.full_name),
                    format!("Email:    {}", user.email),
                    format!("SĐT:      {}", user.phone),
                    format!(
                        "Giấy tờ:  {} {}",
                        user.verification.kind.as_deref().unwrap_or("-"),
                        user.verification.document_number.as_deref().unwrap_or("")
                    ),
                    format!("Tài liệu: {}", or_dash(s.document_url(user))),
                    format!("Rủi ro:   {}", if user.is_high_risk { "Cao" } else { "Thấp" }),
                ])
            }
            View::Vehicles(s) => {
                let vehicle = s.find(&row.id)?;
                Some(vec![
                    format!("Xe:        {} ({})", vehicle.display_name(), vehicle.license_plate),
                    format!("Sức chứa:  {}", vehicle.capacity),
                    format!("Quãng đường/lần sạc: {} km", vehicle.range_per_full_charge),
                    format!("Odo:       {} km", vehicle.odo),
                    format!("Hình ảnh:  {}", or_dash(s.image_url(vehicle))),
                ])
            }
            View::Stations(s) => {
                s.load_staff(&row.id).await;
                let name = row.cells.first().unwrap_or(&row.id);
                let mut lines = vec![format!("Nhân viên trạm {name}")];
                lines.extend(
                    s.staff
                        .iter()
                        .map(|x| format!("  {}  {}  {}", x.full_name, x.phone, x.status_label())),
                );
                Some(lines)
            }
            View::Monitoring(s) => Some(
                s.availability()
                    .into_iter()
                    .map(|x| {
                        format!(
                            "{}: {} xe, sẵn sàng {}, đang thuê {}, bảo trì {}",
                            x.name, x.total, x.available, x.rented, x.maintenance
                        )
                    })
                    .collect(),
            ),
            View::RentalDesk(s) => {
                if row.kind == RowKind::Reservation {
                    let rental = s.check_in(&row.id, None).await?;
                    return Some(vec![format!(
                        "Hợp đồng {} đã tạo, tiền cọc {}",
                        rental.id,
                        format_vnd(rental.deposit_amount)
                    )]);
                }

                let (status, held) = s
                    .find_rental(&row.id)
                    .map(|x| (x.status, x.deposit_held()))?;
                match status {
                    RentalStatus::Booked if !held => {
                        s.hold_deposit(&row.id).await;
                        None
                    }
                    RentalStatus::WaitingForPayment => {
                        let bill = s.calculate_bill(&row.id).await?;
                        Some(bill_lines(&bill))
                    }
                    _ => {
                        let rental = s.find_rental(&row.id)?;
                        Some(vec![
                            format!("Khách:    {}", rental.renter_name()),
                            format!("Xe:       {}", rental.vehicle_label()),
                            format!("Bắt đầu:  {}", format_time(rental.start_time)),
                            format!("Chi phí:  {}", or_dash(s.cost_preview(rental, now).map(format_vnd))),
                            "Dùng `evrent staff pickup` hoặc `evrent staff return` để giao nhận xe".into(),
                        ])
                    }
                }
            }
            View::Payments(s) => {
                let bill = s.load_bill(&row.id).await?;
                Some(bill_lines(&bill))
            }
            View::Rentals(s) => {
                let rental = s.open(&row.id).await?.clone();
                let mut lines = vec![
                    format!("Xe:         {}", rental.vehicle_label()),
                    format!("Trạng thái: {}", rental.status.label()),
                    format!("Bắt đầu:    {}", format_time(rental.start_time)),
                    format!("Kết thúc:   {}", format_time(rental.end_time)),
                    format!(
                        "Tiền cọc:   {} ({})",
                        format_vnd(rental.deposit_amount),
                        rental.deposit_status.label()
                    ),
                ];
                if let Some(cost) = s.cost_preview(&rental, now) {
                    lines.push(format!("Chi phí:    {}", format_vnd(cost)));
                }
                Some(lines)
            }
            View::Personnel(_) | View::Reservations(_) => None,
        }
    }
}

fn bill_lines(bill: &evrent_client::domain::Bill) -> Vec<String> {
    let mut lines = vec![
        format!("Tiền thuê:  {}", format_vnd(bill.rental_cost)),
        format!("Vi phạm:    {}", format_vnd(bill.violation_cost)),
        format!("Bảo hiểm:   {}", format_vnd(bill.insurance)),
        format!("Tiền cọc:   {}", format_vnd(bill.deposit_amount)),
        format!("Tổng cộng:  {}", format_vnd(bill.total_cost)),
    ];
    if let Some(due) = bill.amount_due {
        let label = if due < 0 { "Hoàn lại" } else { "Cần trả" };
        lines.push(format!("{label}:  {}", format_vnd(due.unsigned_abs())));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_pages() {
        for role in Role::ALL {
            assert!(!Route::for_role(*role).is_empty());
        }
        assert_eq!(Route::for_role(Role::Staff)[0], Route::RentalDesk);
    }
}
