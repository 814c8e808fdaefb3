use crate::auth::auth::AuthUser;
use crate::mock::stats::{QuickStats, range_stats};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct StatsQuery {
    /// Aggregation window: today | week | month
    #[schema(example = "today")]
    pub period: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AdminStats {
    #[schema(example = 10)]
    pub total_employees: i64,
    #[schema(example = 7)]
    pub present: i64,
    #[schema(example = 1)]
    pub late: i64,
    #[schema(example = 1)]
    pub absent: i64,
    #[schema(example = 1)]
    pub on_leave: i64,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    #[schema(example = "2026-08-01", value_type = String, format = "date")]
    pub from: NaiveDate,
    #[schema(example = "2026-08-06", value_type = String, format = "date")]
    pub to: NaiveDate,
}

/// Per-status attendance counts for the dashboard (admin)
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Aggregated attendance counts", body = AdminStats),
        (status = 400, description = "Unknown period"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn admin_stats(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<StatsQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let today = Local::now().date_naive();
    let start = match query.period.as_deref().unwrap_or("today") {
        "today" => today,
        "week" => today - Duration::days(6),
        "month" => today.with_day(1).unwrap(),
        other => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": format!("Unknown period '{}'. Allowed: today, week, month", other)
            })));
        }
    };

    let total_employees = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to count employees");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let (present, late, absent, on_leave) = sqlx::query_as::<_, (i64, i64, i64, i64)>(
        r#"
        SELECT
            COUNT(CASE WHEN status = 'present' THEN 1 END),
            COUNT(CASE WHEN status = 'late' THEN 1 END),
            COUNT(CASE WHEN status = 'absent' THEN 1 END),
            COUNT(CASE WHEN status = 'on_leave' THEN 1 END)
        FROM attendance
        WHERE date BETWEEN ? AND ?
        "#,
    )
    .bind(start)
    .bind(today)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to aggregate attendance stats");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(AdminStats {
        total_employees,
        present,
        late,
        absent,
        on_leave,
    }))
}

/// Quick stats over a date range (employee)
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Quick stats for the range", body = QuickStats),
        (status = 400, description = "from is after to"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
pub async fn range_summary(
    auth: AuthUser,
    query: web::Query<SummaryQuery>,
) -> actix_web::Result<impl Responder> {
    auth.employee_code()?;

    if query.from > query.to {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "from cannot be after to"
        })));
    }

    Ok(HttpResponse::Ok().json(range_stats(query.from, query.to)))
}
