use crate::auth::auth::AuthUser;
use crate::mock::attendance::{
    AttendanceDay, AttendanceSummary, format_time, monthly_attendance, summarize, today_attendance,
};
use crate::model::attendance::AttendanceStatus;
use actix_web::{HttpResponse, Responder};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

/// One history row as the clients consume it: times already rendered on
/// the 12-hour clock, unset ones as the en-dash sentinel.
#[derive(Serialize, ToSchema)]
pub struct AttendanceEntry {
    #[schema(example = "2026-08-06", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "08:07 AM")]
    pub check_in: String,
    #[schema(example = "–")]
    pub check_out: String,
    #[schema(example = "present")]
    pub status: AttendanceStatus,
}

impl From<AttendanceDay> for AttendanceEntry {
    fn from(day: AttendanceDay) -> Self {
        AttendanceEntry {
            date: day.date,
            check_in: format_time(day.check_in),
            check_out: format_time(day.check_out),
            status: day.status,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HistoryResponse {
    pub records: Vec<AttendanceEntry>,
    pub summary: AttendanceSummary,
}

/// This month's attendance history with its summary
#[utoipa::path(
    get,
    path = "/api/v1/attendance/history",
    responses(
        (status = 200, description = "Current month history and summary", body = HistoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn history(auth: AuthUser) -> actix_web::Result<impl Responder> {
    auth.employee_code()?;

    let today = Local::now().date_naive();
    let records = monthly_attendance(today, &mut rand::thread_rng());
    let summary = summarize(&records);

    Ok(HttpResponse::Ok().json(HistoryResponse {
        records: records.into_iter().map(AttendanceEntry::from).collect(),
        summary,
    }))
}

/// Today's attendance entry (null on days with none)
#[utoipa::path(
    get,
    path = "/api/v1/attendance/today",
    responses(
        (status = 200, description = "Today's entry, or null", body = AttendanceEntry),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn today(auth: AuthUser) -> actix_web::Result<impl Responder> {
    auth.employee_code()?;

    let today = Local::now().date_naive();
    let entry = today_attendance(today, &mut rand::thread_rng()).map(AttendanceEntry::from);

    Ok(HttpResponse::Ok().json(entry))
}
