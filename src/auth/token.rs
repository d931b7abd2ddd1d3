use crate::config::JwtSettings;
use crate::error::AppError;
use crate::models::{Role, User};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a session token.
///
/// An explicit, fully-typed value object rather than a loose claim bag: a
/// token missing any of these fields, or carrying a non-numeric subject,
/// fails deserialization and is rejected outright.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's store-assigned numeric identifier.
    pub sub: i32,
    /// Username of the token holder.
    pub username: String,
    /// Email of the token holder.
    pub email: String,
    /// Role of the token holder.
    pub role: Role,
    /// Issuer; must match the configured value on validation.
    pub iss: String,
    /// Audience; must match the configured value on validation.
    pub aud: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues a signed session token for a user.
///
/// The token carries the user's id, username, email, and role, plus the
/// configured issuer and audience, and expires after the configured lifetime.
/// Tokens are stateless: nothing is persisted server-side, and validity is
/// fully determined by the signature and the embedded expiry.
pub fn issue_token(user: &User, settings: &JwtSettings) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::minutes(settings.expiry_minutes))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role,
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        exp: expiration,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Verifies a session token and decodes its claims.
///
/// Checks the HS256 signature against the configured secret, requires the
/// issuer and audience claims to match the configured values, and rejects
/// expired tokens with zero clock-skew allowance. Any failure yields
/// `AppError::Unauthorized`; there is no partial trust.
pub fn decode_token(token: &str, settings: &JwtSettings) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[&settings.issuer]);
    validation.set_audience(&[&settings.audience]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
