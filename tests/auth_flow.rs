// tests/auth_flow.rs
//
// Fluxo de autenticação ponta a ponta, pelo router. Precisa de DATABASE_URL.

mod common;

use axum::http::{header, StatusCode};
use common::{create_user, get, json, send, unique_email};
use dealer_backend::{
    models::{auth::UserRole, sale::CreateSalePayload},
    router,
};
use serde_json::json;

#[tokio::test]
async fn register_login_and_me() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let email = unique_email();

    let (status, _, user) = send(
        &app,
        json(
            "POST",
            "/api/v1/auth/register",
            None,
            json!({
                "email": email,
                "password": "segredo123",
                "firstName": "Marina",
                "lastName": "Alves"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["role"], "viewer");
    assert_eq!(user["isActive"], true);
    assert!(user.get("passwordHash").is_none());
    assert!(user["lastLogin"].is_null());

    let (status, headers, auth) = send(
        &app,
        json(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": email, "password": "segredo123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(auth["tokenType"], "bearer");
    assert_eq!(auth["user"]["email"], email.as_str());
    assert!(auth["user"]["lastLogin"].is_string());

    let cookie = headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("access_token=Bearer"));
    assert!(cookie.contains("HttpOnly"));

    let access = auth["accessToken"].as_str().unwrap();
    let (status, _, me) = send(&app, get("/api/v1/auth/me", Some(access))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user["id"]);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let body = json!({
        "email": unique_email(),
        "password": "segredo123",
        "firstName": "Marina",
        "lastName": "Alves"
    });

    let (status, _, _) = send(&app, json("POST", "/api/v1/auth/register", None, body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _, _) = send(&app, json("POST", "/api/v1/auth/register", None, body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let user = create_user(&state, "senha-certa", UserRole::Viewer).await;

    let (wrong_status, _, wrong_body) = send(
        &app,
        json(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": user.email, "password": "senha-errada" }),
        ),
    )
    .await;
    let (unknown_status, _, unknown_body) = send(
        &app,
        json(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": unique_email(), "password": "senha-errada" }),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn deactivated_user_loses_access() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let admin = create_user(&state, "senha-admin", UserRole::DealerAdmin).await;
    let target = create_user(&state, "senha-alvo", UserRole::SalesPerson).await;

    let admin_token = state.auth_service.tokens().issue_access_token(admin.id, None).unwrap();
    let target_token = state.auth_service.tokens().issue_access_token(target.id, None).unwrap();

    let (status, _, updated) = send(
        &app,
        json(
            "PUT",
            &format!("/api/v1/users/{}", target.id),
            Some(&admin_token),
            json!({ "isActive": false }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isActive"], false);

    let (status, _, _) = send(&app, get("/api/v1/auth/me", Some(&target_token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = send(
        &app,
        json(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": target.email, "password": "senha-alvo" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let refresh = state.auth_service.tokens().issue_refresh_token(target.id, None).unwrap();
    let (status, _, _) = send(
        &app,
        json("POST", "/api/v1/auth/refresh", None, json!({ "refreshToken": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_issues_a_new_pair() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let user = create_user(&state, "segredo123", UserRole::Viewer).await;
    let refresh = state.auth_service.tokens().issue_refresh_token(user.id, None).unwrap();

    let (status, headers, auth) = send(
        &app,
        json("POST", "/api/v1/auth/refresh", None, json!({ "refreshToken": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key(header::SET_COOKIE));
    assert_eq!(auth["user"]["id"], user.id);

    let access = auth["accessToken"].as_str().unwrap();
    let (status, _, _) = send(&app, get("/api/v1/auth/me", Some(access))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn password_change_is_hashed_and_takes_effect() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let user = create_user(&state, "senha-antiga", UserRole::Viewer).await;
    let token = state.auth_service.tokens().issue_access_token(user.id, None).unwrap();

    let (status, _, _) = send(
        &app,
        json(
            "PUT",
            &format!("/api/v1/users/{}", user.id),
            Some(&token),
            json!({ "password": "senha-nova" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stored = state.user_service.get(user.id).await.unwrap();
    assert_ne!(stored.password_hash, "senha-nova");
    assert!(stored.password_hash.starts_with("$2"));

    let login = |password: &'static str| {
        json(
            "POST",
            "/api/v1/auth/login",
            None,
            json!({ "email": user.email, "password": password }),
        )
    };
    let (status, _, _) = send(&app, login("senha-antiga")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _, _) = send(&app, login("senha-nova")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let user = create_user(&state, "segredo123", UserRole::Viewer).await;
    let token = state.auth_service.tokens().issue_access_token(user.id, None).unwrap();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/auth/logout")
        .header(header::COOKIE, format!("access_token=Bearer%20{}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, headers, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let cookie = headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn access_token_cookie_authenticates() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let user = create_user(&state, "segredo123", UserRole::Viewer).await;
    let token = state.auth_service.tokens().issue_access_token(user.id, None).unwrap();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/v1/auth/me")
        .header(header::COOKIE, format!("access_token=Bearer%20{}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _, me) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user.id);
    assert_eq!(me["email"], user.email.as_str());
}

#[tokio::test]
async fn form_login_returns_tokens_and_cookie() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let user = create_user(&state, "segredo123", UserRole::Viewer).await;

    let body = format!(
        "grant_type=password&username={}&password=segredo123",
        user.email.replace('@', "%40")
    );
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(axum::body::Body::from(body))
        .unwrap();
    let (status, headers, auth) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(auth["tokenType"], "bearer");
    assert_eq!(auth["user"]["id"], user.id);
    assert!(headers[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .starts_with("access_token=Bearer"));

    let access = auth["accessToken"].as_str().unwrap();
    let (status, _, _) = send(&app, get("/api/v1/auth/me", Some(access))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn out_of_range_amounts_are_bad_requests() {
    let Some(state) = common::db_state().await else { return; };
    let app = router::app(state.clone());
    let user = create_user(&state, "segredo123", UserRole::DealerAdmin).await;
    let token = state.auth_service.tokens().issue_access_token(user.id, None).unwrap();
    let dealership = common::create_dealership(&state).await;
    let vehicle = common::create_vehicle(&state, dealership.id).await;

    let (status, _, body) = send(
        &app,
        json(
            "PUT",
            &format!("/api/v1/vehicles/{}", vehicle.id),
            Some(&token),
            json!({ "salePrice": 1e13 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["sale_price"].is_array());

    let (status, _, _) = send(
        &app,
        json(
            "POST",
            "/api/v1/dealerships",
            Some(&token),
            json!({
                "name": "Auto Center",
                "dealerNumber": common::unique("DLR"),
                "phone": "1".repeat(30),
                "addressLine1": "Rua A, 10",
                "city": "Campinas",
                "state": "SP",
                "zipCode": "13000-000"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let customer = common::create_customer(&state, dealership.id).await;
    let sale: CreateSalePayload = serde_json::from_value(json!({
        "dealershipId": dealership.id,
        "customerId": customer.id,
        "salesPersonId": user.id,
        "vehicleId": vehicle.id,
        "vehiclePrice": 90000,
        "totalAmount": 90000
    }))
    .unwrap();
    let sale = state.sale_repo.create(&sale).await.unwrap();

    let (status, _, body) = send(
        &app,
        json(
            "POST",
            &format!("/api/v1/sales/{}/items", sale.id),
            Some(&token),
            json!({ "name": "x", "quantity": 100, "unitPrice": 5e27 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["unit_price"].is_array());
    assert!(state.sale_repo.list_items(sale.id).await.unwrap().is_empty());
}
