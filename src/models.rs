use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AdminRegisterReq {
    #[schema(example = "admin01")]
    pub admin_id: String,
    #[schema(example = "Site Admin", nullable = true)]
    pub name: Option<String>,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AdminLoginReq {
    #[schema(example = "admin01")]
    pub admin_id: String,
    pub password: String,
}

/// Employees sign in with their code alone; the code is only checked for
/// existence, never interpreted.
#[derive(Deserialize, ToSchema)]
pub struct EmployeeSessionReq {
    #[schema(example = "K14050")]
    pub employee_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// admin_id for admin sessions, employee_code for employee sessions
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    pub jti: String,
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
