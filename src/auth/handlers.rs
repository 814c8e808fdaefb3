use crate::{
    auth::{
        jwt::{generate_access_token, generate_refresh_token, verify_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    model::{admin::Admin, role::Role},
    models::{AdminLoginReq, AdminRegisterReq, EmployeeSessionReq, TokenType},
};
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};

use crate::auth::auth::AuthUser;
use crate::utils::code_cache;
use crate::utils::code_filter;

#[derive(Serialize, Deserialize)]
struct TokenPairResponse {
    access_token: String,
    refresh_token: String,
}

/// Persist a refresh token's jti so it can be rotated and revoked later.
async fn store_refresh_token(
    pool: &MySqlPool,
    subject: &str,
    jti: &str,
    exp: usize,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (subject, jti, expires_at)
        VALUES (?, ?, FROM_UNIXTIME(?))
        "#,
    )
    .bind(subject)
    .bind(jti)
    .bind(exp as i64)
    .execute(pool)
    .await
    .map(|_| ())
}

/// Admin registration handler
pub async fn register(
    payload: web::Json<AdminRegisterReq>,
    pool: web::Data<MySqlPool>,
) -> impl Responder {
    let admin_id = payload.admin_id.trim();

    if admin_id.is_empty() || payload.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Admin id and password must not be empty"
        }));
    }

    let hashed = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing failed");
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register admin"
            }));
        }
    };

    let result = sqlx::query(r#"INSERT INTO admins (admin_id, name, password_hash) VALUES (?, ?, ?)"#)
        .bind(admin_id)
        .bind(&payload.name)
        .bind(&hashed)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => HttpResponse::Created().json(json!({
            "message": "Admin registered successfully"
        })),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return HttpResponse::Conflict().json(json!({
                        "error": "Admin id already exists"
                    }));
                }
            }

            error!(error = %e, "Failed to register admin");
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register admin"
            }))
        }
    }
}

/// Admin login: password check against the stored Argon2 hash, then a
/// JWT pair.
#[instrument(
    name = "auth_login",
    skip(pool, config, payload),
    fields(admin_id = %payload.admin_id)
)]
pub async fn login(
    payload: web::Json<AdminLoginReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Admin login request received");

    if payload.admin_id.trim().is_empty() || payload.password.is_empty() {
        info!("Validation failed: empty admin id or password");
        return HttpResponse::BadRequest().body("Admin id or password required");
    }

    debug!("Fetching admin from database");

    let admin = match sqlx::query_as::<_, Admin>(
        r#"
        SELECT id, admin_id, name, password_hash, created_at
        FROM admins
        WHERE admin_id = ?
        "#,
    )
    .bind(&payload.admin_id)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(admin)) => {
            debug!(admin_db_id = admin.id, "Admin found");
            admin
        }
        Ok(None) => {
            info!("Invalid credentials: admin not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching admin");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = verify_password(&payload.password, &admin.password_hash) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    debug!("Password verified, issuing tokens");

    let access_token = generate_access_token(
        admin.admin_id.clone(),
        Role::Admin as u8,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    let (refresh_token, refresh_claims) = generate_refresh_token(
        admin.admin_id.clone(),
        Role::Admin as u8,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    if let Err(e) = store_refresh_token(
        pool.get_ref(),
        &admin.admin_id,
        &refresh_claims.jti,
        refresh_claims.exp,
    )
    .await
    {
        error!(error = %e, "Failed to store refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    info!("Admin login successful");

    HttpResponse::Ok().json(TokenPairResponse {
        access_token,
        refresh_token,
    })
}

/// true  => the code belongs to a known employee
/// false => no such employee
async fn is_known_employee(code: &str, pool: &MySqlPool) -> bool {
    // 1. Cuckoo filter, fast negative
    if !code_filter::might_exist(code) {
        return false;
    }

    // 2. Moka cache, fast positive
    if code_cache::is_known(code).await {
        return true;
    }

    // 3. Database fallback
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_code = ? LIMIT 1)",
    )
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap_or(false)
}

/// Employee sign-in: existence-only check of the employee code, then a
/// JWT pair. There is no employee password in this system.
#[instrument(
    name = "auth_employee_session",
    skip(pool, config, payload),
    fields(employee_code = %payload.employee_code)
)]
pub async fn employee_session(
    payload: web::Json<EmployeeSessionReq>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let code = payload.employee_code.trim().to_uppercase();

    if code.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Employee code must not be empty"
        }));
    }

    if !is_known_employee(&code, pool.get_ref()).await {
        info!("Unknown employee code");
        return HttpResponse::Unauthorized().json(json!({
            "error": "Unknown employee code"
        }));
    }

    // Fetch the display name for the session response
    let employee = match sqlx::query_as::<_, (String, String)>(
        "SELECT employee_code, name FROM employees WHERE employee_code = ?",
    )
    .bind(&code)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(row)) => row,
        Ok(None) => {
            // cache was stale; drop the entry and reject
            code_cache::forget(&code).await;
            return HttpResponse::Unauthorized().json(json!({
                "error": "Unknown employee code"
            }));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching employee");
            return HttpResponse::InternalServerError().finish();
        }
    };

    code_cache::mark_known(&code).await;

    let access_token = generate_access_token(
        employee.0.clone(),
        Role::Employee as u8,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    let (refresh_token, refresh_claims) = generate_refresh_token(
        employee.0.clone(),
        Role::Employee as u8,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    if let Err(e) = store_refresh_token(
        pool.get_ref(),
        &employee.0,
        &refresh_claims.jti,
        refresh_claims.exp,
    )
    .await
    {
        error!(error = %e, "Failed to store refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    info!("Employee session opened");

    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "employee": {
            "employee_code": employee.0,
            "name": employee.1,
        }
    }))
}

/// Session introspection for the current bearer token
#[get("/me")]
pub async fn me(auth: AuthUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "subject": auth.subject,
        "role_id": auth.role as u8,
    }))
}

pub async fn refresh_token(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().body("No token"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().body("Invalid token"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().finish();
    }

    // find the refresh token in the DB
    let record = match sqlx::query_as::<_, (u64, String, i8)>(
        r#"
        SELECT id, subject, revoked
        FROM refresh_tokens
        WHERE jti = ?
        "#,
    )
    .bind(&claims.jti)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Failed to look up refresh token");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let (record_id, subject, _) = match record {
        Some(r) if r.2 == 0 => r, // 0 = not revoked
        _ => return HttpResponse::Unauthorized().finish(),
    };

    // revoke the old refresh token
    if let Err(e) = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = ?")
        .bind(record_id)
        .execute(pool.get_ref())
        .await
    {
        error!(error = %e, "Failed to revoke refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    // issue a new refresh token
    let (new_refresh_token, new_claims) = generate_refresh_token(
        claims.sub.clone(),
        claims.role,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    if let Err(e) =
        store_refresh_token(pool.get_ref(), &subject, &new_claims.jti, new_claims.exp).await
    {
        error!(error = %e, "Failed to store rotated refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    // new access token
    let access_token = generate_access_token(
        claims.sub.clone(),
        claims.role,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "refresh_token": new_refresh_token
    }))
}

pub async fn logout(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    // only refresh tokens can log out
    if claims.token_type != TokenType::Refresh {
        return HttpResponse::NoContent().finish();
    }

    // revoke the refresh token (idempotent)
    let _ = sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET revoked = 1
        WHERE jti = ?
        "#,
    )
    .bind(&claims.jti)
    .execute(pool.get_ref())
    .await;

    // success even if the token didn't exist
    HttpResponse::NoContent().finish()
}
