mod support;

use axum::http::{Request, StatusCode};
use axum::body::Body;
use serde_json::json;

use support::{build_app, get_request, json_request, register, send};

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;

    let (status, body) = register(&app, "Tester", "tester@example.com", "S3curePass!").await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "tester@example.com");
    assert!(body["user"].get("passwordHash").is_none());

    let req = json_request("POST", "/api/auth/login", None, json!({"email": "tester@example.com", "password": "S3curePass!"}))?;
    let resp = tower::Service::call(&mut app.clone(), req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    // Must set cookie
    let cookie = resp.headers().get("set-cookie").and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));

    // the cookie alone opens the session
    let token = cookie.split(';').next().unwrap_or_default().to_string();
    let req = Request::builder().method("GET").uri("/api/auth/session").header("cookie", token).body(Body::empty())?;
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "USER");
    assert_eq!(body["user"]["name"], "Tester");
    Ok(())
}

#[tokio::test]
async fn test_register_validation() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;

    let (status, body) = register(&app, "", "a@b.com", "secret1").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");

    let (status, _) = register(&app, "A", "not-an-email", "secret1").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, "A", "a@b.com", "short").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, "A", "a@b.com", "secret1").await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = register(&app, "A again", "a@b.com", "secret2").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already registered");
    Ok(())
}

#[tokio::test]
async fn test_login_failures() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    register(&app, "Tester", "tester@example.com", "StrongPass123").await?;

    let login = |email: &str, password: &str| json_request("POST", "/api/auth/login", None, json!({"email": email, "password": password}));

    let (status, body) = send(&app, login("tester@example.com", "wrong")?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, _) = send(&app, login("nobody@example.com", "StrongPass123")?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, login("", "")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, login("bad-format", "StrongPass123")?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_session_requires_valid_token() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;

    let (status, _) = send(&app, get_request("/api/auth/session", None)?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_request("/api/auth/session", Some("garbage"))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // signed with another secret
    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({"sub": "1", "email": "x@y.com", "name": "X", "role": "ADMIN", "iat": 0, "exp": 4_102_444_800i64}),
        &jsonwebtoken::EncodingKey::from_secret(b"not-the-secret"),
    )?;
    let (status, _) = send(&app, get_request("/api/dashboard/stats", Some(&forged))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_cookie() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let req = json_request("POST", "/api/auth/logout", None, json!({}))?;
    let resp = tower::Service::call(&mut app.clone(), req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp.headers().get("set-cookie").and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("Max-Age=0") || cookie.contains("Expires"));
    Ok(())
}

#[tokio::test]
async fn test_session_token_checked_against_configured_secret() -> anyhow::Result<()> {
    let (app, _db) = build_app().await?;
    let sign = |exp: i64| {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &json!({"sub": "7", "email": "ops@example.com", "name": "Ops", "role": "ADMIN", "iat": 0, "exp": exp}),
            &jsonwebtoken::EncodingKey::from_secret(support::JWT_SECRET.as_bytes()),
        )
    };

    // 已过期
    let expired = sign(1_000)?;
    let (status, _) = send(&app, get_request("/api/dashboard/stats", Some(&expired))?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let valid = sign(4_102_444_800)?;
    let (status, body) = send(&app, get_request("/api/dashboard/stats", Some(&valid))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCars"], 0);
    Ok(())
}
