use crate::{
    auth::{hash_password, issue_token, verify_password, AuthResponse, LoginRequest, RegisterRequest},
    config::JwtSettings,
    error::AppError,
    store::users,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account with the default role and returns a session
/// token plus the public profile view. The response never reveals whether the
/// username or the email was the conflicting field.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    jwt: web::Data<JwtSettings>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Advisory pre-check for a friendlier error; the unique indexes on the
    // users table remain the authority under concurrent registration.
    if users::email_exists(&pool, &register_data.email).await?
        || users::username_exists(&pool, &register_data.username).await?
    {
        return Err(AppError::Conflict("Username or email already exists".into()));
    }

    // Hash password and persist the new user
    let password_hash = hash_password(&register_data.password)?;
    let user = users::insert(
        &pool,
        &register_data.username,
        &register_data.email,
        &password_hash,
    )
    .await?;

    // Issue token
    let token = issue_token(&user, &jwt)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        username: user.username,
        email: user.email,
        role: user.role,
    }))
}

/// Login user
///
/// Authenticates a user by email and password and returns a session token
/// plus the public profile view. An unknown email and a wrong password
/// produce the same generic failure.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    jwt: web::Data<JwtSettings>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user = users::find_by_email(&pool, &login_data.email).await?;

    match user {
        Some(user) => {
            if verify_password(&login_data.password, &user.password_hash)? {
                let token = issue_token(&user, &jwt)?;
                Ok(HttpResponse::Ok().json(AuthResponse {
                    token,
                    username: user.username,
                    email: user.email,
                    role: user.role,
                }))
            } else {
                Err(AppError::Unauthorized("Invalid email or password".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid email or password".into())),
    }
}
