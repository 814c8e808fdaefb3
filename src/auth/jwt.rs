use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::{Claims, TokenType};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn generate_access_token(subject: String, role: u8, secret: &str, ttl: usize) -> String {
    let claims = Claims {
        sub: subject,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type: TokenType::Access,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn generate_refresh_token(subject: String, role: u8, secret: &str, ttl: usize) -> (String, Claims) {
    let claims = Claims {
        sub: subject,
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type: TokenType::Refresh,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    (token, claims)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::role::Role;

    #[test]
    fn access_token_round_trips() {
        let token = generate_access_token("K14050".to_string(), Role::Employee as u8, "secret", 900);
        let claims = verify_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, "K14050");
        assert_eq!(claims.role, Role::Employee as u8);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn refresh_token_carries_its_own_jti() {
        let (token, claims) =
            generate_refresh_token("admin01".to_string(), Role::Admin as u8, "secret", 3600);
        let decoded = verify_token(&token, "secret").unwrap();

        assert_eq!(decoded.jti, claims.jti);
        assert_eq!(decoded.token_type, TokenType::Refresh);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_access_token("K14050".to_string(), Role::Employee as u8, "secret", 900);
        assert!(verify_token(&token, "other-secret").is_err());
    }
}
