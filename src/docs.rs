use crate::api::attendance::{
    AttendanceFilter, AttendanceListResponse, AttendanceListRow, CreateAttendance,
};
use crate::api::dashboard::{AdminStats, StatsQuery, SummaryQuery};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery};
use crate::api::history::{AttendanceEntry, HistoryResponse};
use crate::mock::attendance::AttendanceSummary;
use crate::mock::leave::{LeaveRecord, LeaveType};
use crate::mock::stats::QuickStats;
use crate::model::attendance::AttendanceStatus;
use crate::model::employee::Employee;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Management System API",
        version = "1.0.0",
        description = r#"
## Attendance Management System (AMS)

This API powers an employee attendance tracking system.

### 🔹 Key Features
- **Attendance Tracking**
  - Daily check-in and check-out, monthly history with summary stats
- **Leave History**
  - Trailing six-month leave records per employee
- **Employee Management**
  - Create, update, list, and view employee profiles (admin)
- **Dashboards**
  - Per-status attendance aggregates for admins, quick stats for employees

### 🔐 Security
Admins authenticate with an id + password; employees open a session with
their employee code. All protected endpoints use **JWT Bearer tokens**.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::list_attendance,
        crate::api::attendance::create_record,
        crate::api::attendance::update_record,
        crate::api::attendance::delete_record,

        crate::api::history::history,
        crate::api::history::today,

        crate::api::leave::leaves,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::dashboard::admin_stats,
        crate::api::dashboard::range_summary
    ),
    components(
        schemas(
            CreateAttendance,
            AttendanceFilter,
            AttendanceListRow,
            AttendanceListResponse,
            AttendanceEntry,
            HistoryResponse,
            AttendanceSummary,
            AttendanceStatus,
            LeaveRecord,
            LeaveType,
            QuickStats,
            CreateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            Employee,
            AdminStats,
            StatsQuery,
            SummaryQuery
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Attendance tracking APIs"),
        (name = "Leave", description = "Leave history APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Dashboard", description = "Dashboard and stats APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
