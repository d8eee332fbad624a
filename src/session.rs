//! Cookie-addressed, in-process sessions.
//!
//! Each browser session is identified by a uuid cookie; the middleware
//! creates the id on first contact and exposes it through request
//! extensions. Session data (cart, operator flag) lives in a dashmap keyed
//! by that id — single-owner per session, so no further coordination is
//! needed.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::cart::Cart;

pub const SESSION_COOKIE: &str = "verger_session";

/// Session id attached to every request by [`session_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

#[derive(Debug, Default, Clone)]
pub struct Session {
    pub cart: Cart,
    pub operator: bool,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<DashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a closure against the session's cart, creating the session when
    /// absent.
    pub fn with_cart<T>(&self, id: SessionId, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut entry = self.inner.entry(id.0).or_default();
        f(&mut entry.cart)
    }

    /// Snapshot of the session's cart (empty when the session is unknown).
    pub fn cart(&self, id: SessionId) -> Cart {
        self.inner
            .get(&id.0)
            .map(|s| s.cart.clone())
            .unwrap_or_default()
    }

    pub fn clear_cart(&self, id: SessionId) {
        if let Some(mut entry) = self.inner.get_mut(&id.0) {
            entry.cart.clear();
        }
    }

    pub fn is_operator(&self, id: SessionId) -> bool {
        self.inner.get(&id.0).map(|s| s.operator).unwrap_or(false)
    }

    pub fn set_operator(&self, id: SessionId, operator: bool) {
        self.inner.entry(id.0).or_default().operator = operator;
    }
}

fn session_id_from_cookies(request: &Request<Body>) -> Option<Uuid> {
    let cookies = request.headers().get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value.trim()).ok()
        } else {
            None
        }
    })
}

/// Reads the session cookie, minting a fresh id (and Set-Cookie) when the
/// request carries none.
pub async fn session_middleware(mut request: Request<Body>, next: Next) -> Response {
    let (id, fresh) = match session_id_from_cookies(&request) {
        Some(id) => (id, false),
        None => (Uuid::new_v4(), true),
    };

    request.extensions_mut().insert(SessionId(id));
    let mut response = next.run(request).await;

    if fresh {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}
