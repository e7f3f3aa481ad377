//! Access rules for the client screens. Decisions are recomputed for every
//! request from the session alone.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    middleware::auth::{AuthUser, Session},
    models::Role,
};

pub const SIGN_IN_PATH: &str = "/auth";
pub const SHOP_PATH: &str = "/shop";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Public,
    SignedIn,
    Role(Role),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Screen {
    pub path: &'static str,
    pub gate: Gate,
}

pub const SCREENS: [Screen; 9] = [
    Screen { path: "/", gate: Gate::Public },
    Screen { path: SIGN_IN_PATH, gate: Gate::Public },
    Screen { path: SHOP_PATH, gate: Gate::SignedIn },
    Screen { path: "/product/{id}", gate: Gate::SignedIn },
    Screen { path: "/cart", gate: Gate::SignedIn },
    Screen { path: "/profile", gate: Gate::SignedIn },
    Screen { path: "/dashboard", gate: Gate::Role(Role::Farmer) },
    Screen { path: "/admin", gate: Gate::Role(Role::Admin) },
    Screen { path: "/chatbot", gate: Gate::Public },
];

/// Gate of a screen route pattern. Routes missing from the table need a session.
pub fn gate_of(route: &str) -> Gate {
    SCREENS
        .iter()
        .find(|s| s.path == route)
        .map_or(Gate::SignedIn, |s| s.gate)
}

/// Signed-out callers go to sign-in; signed-in callers lacking the role go to the shop.
pub fn evaluate(gate: Gate, session: Option<&AuthUser>) -> Decision {
    match (gate, session) {
        (Gate::Public, _) => Decision::Allow,
        (_, None) => Decision::Redirect(SIGN_IN_PATH),
        (Gate::SignedIn, Some(_)) => Decision::Allow,
        (Gate::Role(role), Some(user)) if user.role == role => Decision::Allow,
        (Gate::Role(_), Some(_)) => Decision::Redirect(SHOP_PATH),
    }
}

/// A guard refusal, answered with `303 See Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirection(pub &'static str);

impl IntoResponse for Redirection {
    fn into_response(self) -> Response {
        Redirect::to(self.0).into_response()
    }
}

/// Screen middleware. Looks up the matched route in [`SCREENS`] and either
/// answers with the redirect or passes the signed-in caller on as an
/// `Extension<AuthUser>`.
pub async fn enforce(session: Session, mut request: Request, next: Next) -> Response {
    let gate = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(Gate::SignedIn, |route| gate_of(route.as_str()));

    match evaluate(gate, session.0.as_ref()) {
        Decision::Redirect(to) => {
            tracing::debug!(path = %request.uri().path(), to, "screen refused");
            Redirection(to).into_response()
        }
        Decision::Allow => {
            if let Some(user) = session.0 {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
    }
}
