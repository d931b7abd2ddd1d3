use actix_web::{test, web, App, HttpResponse, Responder};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use sqlx::PgPool;

use tasktrack::auth::{issue_token, AuthMiddleware, AuthenticatedUser};
use tasktrack::config::JwtSettings;
use tasktrack::models::{Role, User};
use tasktrack::routes;

fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "integration-test-secret".to_string(),
        issuer: "tasktrack".to_string(),
        audience: "tasktrack-clients".to_string(),
        expiry_minutes: 60,
    }
}

fn user_fixture(id: i32) -> User {
    User {
        id,
        username: format!("user{}", id),
        email: format!("user{}@example.com", id),
        password_hash: "$2b$12$irrelevant".to_string(),
        role: Role::User,
        created_at: Utc::now(),
    }
}

async fn whoami(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(json!({ "id": user.id }))
}

// Token-gate tests: the authorization gate rejects requests before any
// handler runs, so these need no database.

#[actix_rt::test]
async fn test_protected_route_rejects_missing_token() {
    let settings = jwt_settings();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(settings))
            .service(
                web::scope("/protected")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());
}

#[actix_rt::test]
async fn test_protected_route_rejects_garbage_token() {
    let settings = jwt_settings();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(settings))
            .service(
                web::scope("/protected")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_protected_route_rejects_forged_token() {
    let settings = jwt_settings();

    let mut forger = jwt_settings();
    forger.secret = "some-other-secret".to_string();
    let forged = issue_token(&user_fixture(1), &forger).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(settings))
            .service(
                web::scope("/protected")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_protected_route_rejects_wrong_issuer() {
    let settings = jwt_settings();

    let mut other_issuer = jwt_settings();
    other_issuer.issuer = "someone-else".to_string();
    let token = issue_token(&user_fixture(1), &other_issuer).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(settings))
            .service(
                web::scope("/protected")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_protected_route_accepts_valid_token_and_extracts_identity() {
    let settings = jwt_settings();
    let token = issue_token(&user_fixture(42), &settings).unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(settings))
            .service(
                web::scope("/protected")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(whoami)),
            ),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 42);
}

// Full registration/login flow against a live database. Requires Postgres
// with the schema from migrations/ and DATABASE_URL set; run with
// `cargo test -- --ignored`.

#[ignore]
#[actix_rt::test]
async fn test_register_and_login_flow() {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    // Clean up potential existing user
    let _ = sqlx::query("DELETE FROM users WHERE email = $1 OR username = $2")
        .bind("integration@example.com")
        .bind("integration_user")
        .execute(&pool)
        .await;

    let settings = jwt_settings();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(settings.clone()))
            .configure(routes::config),
    )
    .await;

    // Register a new user
    let register_payload = json!({
        "username": "integration_user",
        "email": "integration@example.com",
        "password": "Password123!"
    });
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );

    let register_response: tasktrack::auth::AuthResponse =
        serde_json::from_slice(&body_bytes).expect("Failed to parse register response JSON");
    assert_eq!(register_response.username, "integration_user");
    assert_eq!(register_response.email, "integration@example.com");
    assert_eq!(register_response.role, Role::User);
    assert!(!register_response.token.is_empty());

    // The password hash must never appear in the response.
    let raw: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert!(raw.get("password_hash").is_none());
    assert!(raw.get("passwordHash").is_none());

    // Registering the same email again fails, even with a different username.
    let conflict_payload = json!({
        "username": "integration_user_2",
        "email": "integration@example.com",
        "password": "Password123!"
    });
    let req_conflict = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&conflict_payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    assert_eq!(
        resp_conflict.status(),
        actix_web::http::StatusCode::BAD_REQUEST
    );

    // Login with the registered user
    let login_payload = json!({
        "email": "integration@example.com",
        "password": "Password123!"
    });
    let req_login = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&login_payload)
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    assert_eq!(resp_login.status(), actix_web::http::StatusCode::OK);

    let login_response: tasktrack::auth::AuthResponse = test::read_body_json(resp_login).await;
    assert!(!login_response.token.is_empty());

    // Wrong password yields the same generic 401 as an unknown email.
    let req_bad_password = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": "integration@example.com",
            "password": "WrongPassword!"
        }))
        .to_request();
    let resp_bad_password = test::call_service(&app, req_bad_password).await;
    assert_eq!(
        resp_bad_password.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );
    let bad_password_body: serde_json::Value = test::read_body_json(resp_bad_password).await;

    let req_unknown_email = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": "nobody@example.com",
            "password": "Password123!"
        }))
        .to_request();
    let resp_unknown_email = test::call_service(&app, req_unknown_email).await;
    assert_eq!(
        resp_unknown_email.status(),
        actix_web::http::StatusCode::UNAUTHORIZED
    );
    let unknown_email_body: serde_json::Value = test::read_body_json(resp_unknown_email).await;

    assert_eq!(bad_password_body, unknown_email_body);
}

#[ignore]
#[actix_rt::test]
async fn test_register_validation_failures() {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(jwt_settings()))
            .configure(routes::config),
    )
    .await;

    // Blank username
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "username": "",
            "email": "blank@example.com",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Malformed email
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "username": "valid_user",
            "email": "not-an-email",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);

    // Short password
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "username": "valid_user",
            "email": "valid@example.com",
            "password": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}
