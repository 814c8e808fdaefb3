use crate::auth::auth::AuthUser;
use crate::mock::leave::{LeaveRecord, leave_history};
use actix_web::{HttpResponse, Responder};
use chrono::Local;

/// Leave history for the trailing six months, newest first
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    responses(
        (status = 200, description = "Leave records, newest first", body = Vec<LeaveRecord>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leaves(auth: AuthUser) -> actix_web::Result<impl Responder> {
    let code = auth.employee_code()?;

    let today = Local::now().date_naive();
    let records = leave_history(code, today, &mut rand::thread_rng());

    Ok(HttpResponse::Ok().json(records))
}
