mod common;

use axum::http::{StatusCode, header};
use krishimitra::{
    guard::{Decision, Gate, SCREENS, evaluate, gate_of},
    models::Role,
    routes::create_app,
};
use tower::ServiceExt;

#[test]
fn decisions_follow_session_and_role() {
    let user = common::caller(Role::User);
    let farmer = common::caller(Role::Farmer);
    let admin = common::caller(Role::Admin);

    assert_eq!(evaluate(Gate::Public, None), Decision::Allow);
    assert_eq!(evaluate(Gate::SignedIn, None), Decision::Redirect("/auth"));
    assert_eq!(evaluate(Gate::SignedIn, Some(&user)), Decision::Allow);

    let dashboard = Gate::Role(Role::Farmer);
    assert_eq!(evaluate(dashboard, None), Decision::Redirect("/auth"));
    assert_eq!(evaluate(dashboard, Some(&user)), Decision::Redirect("/shop"));
    assert_eq!(evaluate(dashboard, Some(&admin)), Decision::Redirect("/shop"));
    assert_eq!(evaluate(dashboard, Some(&farmer)), Decision::Allow);

    let panel = Gate::Role(Role::Admin);
    assert_eq!(evaluate(panel, Some(&farmer)), Decision::Redirect("/shop"));
    assert_eq!(evaluate(panel, Some(&admin)), Decision::Allow);
}

#[test]
fn route_table_covers_every_screen() {
    assert_eq!(SCREENS.len(), 9);
    assert_eq!(gate_of("/"), Gate::Public);
    assert_eq!(gate_of("/chatbot"), Gate::Public);
    assert_eq!(gate_of("/product/{id}"), Gate::SignedIn);
    assert_eq!(gate_of("/dashboard"), Gate::Role(Role::Farmer));
    assert_eq!(gate_of("/admin"), Gate::Role(Role::Admin));
    assert_eq!(gate_of("/nowhere"), Gate::SignedIn);
}

fn concrete(route: &str) -> String {
    route.replace("{id}", "1")
}

#[tokio::test]
async fn router_enforces_the_table_for_signed_out_callers() {
    let app = create_app(common::offline_state());

    for screen in SCREENS {
        let uri = concrete(screen.path);
        let response = app.clone().oneshot(common::get(&uri, None)).await.expect("response");
        match screen.gate {
            Gate::Public => assert_eq!(response.status(), StatusCode::OK, "{uri}"),
            Gate::SignedIn | Gate::Role(_) => {
                assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
                assert_eq!(response.headers()[header::LOCATION], "/auth", "{uri}");
            }
        }
    }
}

#[tokio::test]
async fn router_enforces_role_screens_from_the_table() {
    let state = common::offline_state();
    let buyer = common::bearer(&state, &common::caller(Role::User));
    let app = create_app(state);

    for screen in SCREENS.iter().filter(|s| matches!(s.gate, Gate::Role(_))) {
        let uri = concrete(screen.path);
        let response = app
            .clone()
            .oneshot(common::get(&uri, Some(&buyer)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/shop", "{uri}");
    }
}

async fn location_of(uri: &str, auth: Option<&str>) -> Option<String> {
    let app = create_app(common::offline_state());
    let response = app.oneshot(common::get(uri, auth)).await.expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn signed_out_screens_redirect_to_sign_in() {
    for uri in ["/shop", "/product/1", "/product/abc", "/cart", "/profile", "/dashboard", "/admin"] {
        assert_eq!(location_of(uri, None).await.as_deref(), Some("/auth"), "{uri}");
    }
}

#[tokio::test]
async fn wrong_role_redirects_to_shop() {
    let state = common::offline_state();
    let user = common::bearer(&state, &common::caller(Role::User));
    let farmer = common::bearer(&state, &common::caller(Role::Farmer));

    assert_eq!(location_of("/dashboard", Some(&user)).await.as_deref(), Some("/shop"));
    assert_eq!(location_of("/admin", Some(&farmer)).await.as_deref(), Some("/shop"));
}

#[tokio::test]
async fn invalid_token_counts_as_signed_out() {
    assert_eq!(
        location_of("/cart", Some("Bearer not-a-token")).await.as_deref(),
        Some("/auth")
    );
}

#[tokio::test]
async fn public_and_signed_in_screens_render() {
    let state = common::offline_state();
    let auth = common::bearer(&state, &common::caller(Role::User));
    let app = create_app(state);

    for (uri, auth) in [
        ("/", None),
        ("/auth", None),
        ("/chatbot", None),
        ("/shop?category=fruits", Some(auth.as_str())),
        ("/product/2", Some(auth.as_str())),
        ("/cart", Some(auth.as_str())),
    ] {
        let response = app.clone().oneshot(common::get(uri, auth)).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let response = app
        .oneshot(common::get("/shop?q=mango", Some(&auth)))
        .await
        .expect("response");
    let body = common::json_body(response).await;
    assert_eq!(body["products"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["cart_count"], 0);
}

#[tokio::test]
async fn unknown_product_is_not_found_once_signed_in() {
    let state = common::offline_state();
    let auth = common::bearer(&state, &common::caller(Role::User));
    let response = create_app(state)
        .oneshot(common::get("/product/42", Some(&auth)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_answers_401_instead_of_redirecting() {
    let response = create_app(common::offline_state())
        .oneshot(common::get("/api/cart", None))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
