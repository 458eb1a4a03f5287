//! User facing strings. The platform operates in Vietnamese.

pub const GENERIC_ERROR: &str = "Đã xảy ra lỗi. Vui lòng thử lại sau.";
pub const ERROR_TITLE: &str = "Lỗi";
pub const SUCCESS_TITLE: &str = "Thành công";
pub const INVALID_FORM: &str = "Dữ liệu không hợp lệ";
pub const EMAIL_EXISTS: &str = "Email đã tồn tại";

pub const LOAD_USERS_FAILED: &str = "Không thể tải danh sách người dùng";
pub const LOAD_VEHICLES_FAILED: &str = "Không thể tải danh sách xe";
pub const LOAD_STATIONS_FAILED: &str = "Không thể tải danh sách trạm";
pub const LOAD_RENTALS_FAILED: &str = "Không thể tải danh sách thuê xe";
pub const LOAD_RESERVATIONS_FAILED: &str = "Không thể tải danh sách đặt xe";
pub const LOAD_MONITORING_FAILED: &str = "Không thể tải dữ liệu giám sát";
pub const LOAD_INCIDENTS_FAILED: &str = "Không thể tải danh sách sự cố";
pub const LOAD_VIOLATIONS_FAILED: &str = "Không thể tải danh sách vi phạm";
pub const LOAD_RENTAL_FAILED: &str = "Không thể tải thông tin thuê xe";
pub const BILL_FAILED: &str = "Không thể tính hóa đơn";
pub const PAYMENT_FAILED: &str = "Thanh toán thất bại";

pub const USER_CREATED: &str = "Đã tạo tài khoản";
pub const USER_UPDATED: &str = "Đã cập nhật thông tin";
pub const STATUS_UPDATED: &str = "Đã cập nhật trạng thái";
pub const USER_VERIFIED: &str = "Đã xác minh giấy tờ";
pub const STATION_ASSIGNED: &str = "Đã phân công trạm";

pub const VEHICLE_CREATED: &str = "Đã thêm xe mới";
pub const VEHICLE_UPDATED: &str = "Đã cập nhật xe";
pub const VEHICLE_DELETED: &str = "Đã xóa xe";

pub const STATION_CREATED: &str = "Đã thêm trạm mới";
pub const STATION_UPDATED: &str = "Đã cập nhật trạm";

pub const INCIDENT_REPORTED: &str = "Đã ghi nhận sự cố";
pub const INCIDENT_UPDATED: &str = "Đã cập nhật sự cố";

pub const RESERVATION_CREATED: &str = "Đặt xe thành công";
pub const RESERVATION_CANCELLED: &str = "Đã hủy đặt xe";

pub const CHECKED_IN: &str = "Đã tạo hợp đồng thuê";
pub const DEPOSIT_HELD: &str = "Đã thu tiền cọc";
pub const PICKUP_CONFIRMED: &str = "Đã xác nhận giao xe";
pub const RETURN_CONFIRMED: &str = "Đã xác nhận nhận lại xe";
pub const BILL_READY: &str = "Đã tính hóa đơn";
pub const VIOLATION_ADDED: &str = "Đã ghi nhận vi phạm";
pub const PAYMENT_DONE: &str = "Thanh toán thành công";
pub const PAYMENT_LINK: &str = "Đã tạo liên kết thanh toán";
pub const DEPOSIT_REQUIRED: &str = "Vui lòng thu tiền cọc trước khi giao xe";
pub const DEPOSIT_UNKNOWN: &str = "Không xác định được tiền cọc cho xe này";
pub const NOT_CANCELLABLE: &str = "Không thể hủy đặt xe ở trạng thái này";
pub const WALK_IN_CREATED: &str = "Đã tạo hợp đồng thuê tại quầy";
