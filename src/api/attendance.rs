use crate::auth::auth::AuthUser;
use crate::model::attendance::AttendanceStatus;
use crate::utils::db_utils::{build_update_sql, execute_update};
use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

/// Status values the attendance table accepts. The generated history also
/// knows `weekend`/`holiday`, but those are never persisted.
const DB_STATUSES: &[&str] = &["present", "absent", "late", "on_leave"];

/// Columns an admin may touch when editing a record.
const UPDATE_COLUMNS: &[&str] = &["employee_code", "date", "status", "time_in", "time_out"];

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "K14050")]
    pub employee_code: String,
    #[schema(example = "2026-08-06", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "present")]
    pub status: String,
    #[schema(example = "09:00:00", value_type = String, nullable = true)]
    pub time_in: Option<NaiveTime>,
    #[schema(example = "17:00:00", value_type = String, nullable = true)]
    pub time_out: Option<NaiveTime>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceFilter {
    #[schema(example = "K14050")]
    /// Filter by employee code
    pub employee_code: Option<String>,
    #[schema(example = "late")]
    /// Filter by status
    pub status: Option<String>,
    #[schema(example = "2026-07-07", value_type = String, format = "date")]
    /// Earliest date (inclusive)
    pub from: Option<NaiveDate>,
    #[schema(example = "2026-08-06", value_type = String, format = "date")]
    /// Latest date (inclusive)
    pub to: Option<NaiveDate>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    #[schema(example = 20)]
    /// Pagination per page number
    pub per_page: Option<u64>,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    Str(&'a str),
    Date(NaiveDate),
}

#[derive(Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceListRow {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "K14050")]
    pub employee_code: String,
    #[schema(example = "Jane Smith", nullable = true)]
    pub employee_name: Option<String>,
    #[schema(example = "2026-08-06", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "present")]
    pub status: String,
    #[schema(example = "08:55:00", value_type = String, nullable = true)]
    pub time_in: Option<NaiveTime>,
    #[schema(example = "17:10:00", value_type = String, nullable = true)]
    pub time_out: Option<NaiveTime>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceListRow>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: i64,
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully",
            "status": "present"
        })),
        (status = 400, description = "Already checked in today", body = Object, example = json!({
            "message": "Already checked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_code = auth.employee_code()?.to_string();

    // Same threshold the generated history uses: 09:00 and later is late.
    let status = if Local::now().time() < NaiveTime::from_hms_opt(9, 0, 0).unwrap() {
        AttendanceStatus::Present
    } else {
        AttendanceStatus::Late
    };

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_code, date, status, time_in)
        VALUES (?, CURDATE(), ?, CURTIME())
        "#,
    )
    .bind(&employee_code)
    .bind(status.as_str())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({
            "message": "Checked in successfully",
            "status": status.as_str()
        }))),

        Err(e) => {
            // Duplicate check-in for same day
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::BadRequest().json(json!({
                        "message": "Already checked in today"
                    })));
                }
            }

            tracing::error!(error = %e, employee_code, "Check-in failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/v1/attendance/check-out",
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully"
        })),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "No active check-in found for today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_code = auth.employee_code()?.to_string();

    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET time_out = CURTIME()
        WHERE employee_code = ?
        AND date = CURDATE()
        AND time_out IS NULL
        "#,
    )
    .bind(&employee_code)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_code, "Check-out failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "No active check-in found for today"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Checked out successfully"
    })))
}

/// Paginated attendance listing (admin)
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Paginated attendance list", body = AttendanceListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(code) = query.employee_code.as_deref() {
        where_sql.push_str(" AND a.employee_code = ?");
        args.push(FilterValue::Str(code));
    }

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND a.status = ?");
        args.push(FilterValue::Str(status));
    }

    if let Some(from) = query.from {
        where_sql.push_str(" AND a.date >= ?");
        args.push(FilterValue::Date(from));
    }

    if let Some(to) = query.to {
        where_sql.push_str(" AND a.date <= ?");
        args.push(FilterValue::Date(to));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM attendance a{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::Str(s) => count_q.bind(*s),
            FilterValue::Date(d) => count_q.bind(*d),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count attendance records");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT a.id, a.employee_code, e.name AS employee_name,
               a.date, a.status, a.time_in, a.time_out
        FROM attendance a
        LEFT JOIN employees e ON e.employee_code = a.employee_code
        {}
        ORDER BY a.date DESC, a.employee_code
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, AttendanceListRow>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::Str(s) => data_q.bind(s),
            FilterValue::Date(d) => data_q.bind(d),
        };
    }

    let records = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch attendance list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        data: records,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

/// Create a manual attendance record (admin)
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 200, description = "Attendance record created", body = Object, example = json!({
            "message": "Attendance record created"
        })),
        (status = 400, description = "Invalid status or duplicate record"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn create_record(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateAttendance>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    if !DB_STATUSES.contains(&payload.status.as_str()) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Invalid status. Allowed: present, absent, late, on_leave"
        })));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_code, date, status, time_in, time_out)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.employee_code)
    .bind(payload.date)
    .bind(&payload.status)
    .bind(payload.time_in)
    .bind(payload.time_out)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({
            "message": "Attendance record created"
        }))),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::BadRequest().json(json!({
                        "message": "A record for this employee and date already exists"
                    })));
                }
            }

            tracing::error!(error = %e, "Failed to create attendance record");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Edit an attendance record (admin)
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{record_id}",
    params(
        ("record_id" = u64, Path, description = "Attendance record ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Attendance record updated"),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Attendance record not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn update_record(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<i64>,
    body: web::Json<serde_json::Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let record_id = path.into_inner();

    if let Some(status) = body.get("status").and_then(|s| s.as_str()) {
        if !DB_STATUSES.contains(&status) {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "Invalid status. Allowed: present, absent, late, on_leave"
            })));
        }
    }

    let update = build_update_sql("attendance", UPDATE_COLUMNS, &body, "id", record_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Attendance record not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance record updated"
    })))
}

/// Delete an attendance record (admin)
#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{record_id}",
    params(
        ("record_id" = u64, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Attendance record not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn delete_record(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let record_id = path.into_inner();

    let result = sqlx::query(r#"DELETE FROM attendance WHERE id = ?"#)
        .bind(record_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, record_id, "Failed to delete attendance record");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Attendance record not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}
