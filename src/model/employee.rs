use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_code": "K14050",
        "name": "Jane Smith",
        "department": "Engineering",
        "position": "Software Engineer",
        "email": "jane.smith@company.com",
        "phone": "+14155550123",
        "profile_image": "/placeholder.svg",
        "join_date": "2024-01-01",
        "status": "active"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "K14050")]
    pub employee_code: String,

    #[schema(example = "Jane Smith")]
    pub name: String,

    #[schema(example = "Engineering", nullable = true)]
    pub department: Option<String>,

    #[schema(example = "Software Engineer", nullable = true)]
    pub position: Option<String>,

    #[schema(example = "jane.smith@company.com", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+14155550123", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "/placeholder.svg")]
    pub profile_image: String,

    #[schema(
        example = "2024-01-01",
        value_type = String,
        format = "date",
        nullable = true
    )]
    pub join_date: Option<NaiveDate>,

    #[schema(example = "active")]
    pub status: String,
}
