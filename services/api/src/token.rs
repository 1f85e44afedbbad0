use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ratehub_domain::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access tokens are valid for 24 hours from issuance.
pub const TOKEN_TTL_SECS: u64 = 86_400;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user id.
    pub sub: String,
    pub role: Role,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token is expired")]
    Expired,
    #[error("token is malformed")]
    Malformed,
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Signs an HS256 access token carrying the user's id and role.
pub fn issue_token(user_id: Uuid, role: Role, secret: &str) -> Result<String, anyhow::Error> {
    let iat = now_secs();
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verifies signature and expiry, returning the embedded claims.
///
/// Expiry is exclusive: a token stops being valid the second `exp` is
/// reached. The library check alone still admits `exp == now`, so the
/// boundary is enforced here explicitly.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    })?;

    if data.claims.exp <= now_secs() {
        return Err(TokenError::Expired);
    }
    Ok(data.claims)
}
