use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
    typed_header::TypedHeaderRejection,
};

use std::sync::Arc;

use crate::{liabilities, profiles, records, roles};
use engine::Engine;

static CALLER_IDENTITY_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("caller-identity");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Identity of the authenticated caller, inserted by the auth layer.
#[derive(Clone, Debug)]
pub struct Caller(pub String);

/// `TypedHeader` for the caller identity.
///
/// Every request must contain a non-blank "caller-identity" entry in the header.
#[derive(Debug)]
struct CallerIdentity(String);

impl Header for CallerIdentity {
    fn name() -> &'static axum::http::HeaderName {
        &CALLER_IDENTITY_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(CallerIdentity(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode caller-identity header"),
        }
    }
}

async fn auth(
    identity: Result<TypedHeader<CallerIdentity>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Ok(TypedHeader(CallerIdentity(identity))) = identity else {
        tracing::warn!("rejected request without caller identity");
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(Caller(identity));
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/income", post(records::income_new))
        .route("/expense", post(records::expense_new))
        .route("/daily/{kind}", get(records::daily_list))
        .route("/daily", delete(records::daily_delete))
        .route(
            "/sales",
            post(records::sale_new)
                .get(records::sale_list)
                .delete(records::sale_delete),
        )
        .route(
            "/purchases",
            post(records::purchase_new)
                .get(records::purchase_list)
                .delete(records::purchase_delete),
        )
        .route(
            "/loans",
            post(liabilities::loan_new)
                .get(liabilities::loan_list)
                .delete(liabilities::loan_delete),
        )
        .route("/loans/{index}/repay", post(liabilities::loan_repay))
        .route(
            "/advances",
            post(liabilities::advance_new)
                .get(liabilities::advance_list)
                .delete(liabilities::advance_delete),
        )
        .route("/advances/{index}/settle", post(liabilities::advance_settle))
        .route("/role", get(roles::get).put(roles::assign))
        .route("/role/admin", get(roles::is_admin))
        .route("/profile", get(profiles::get).put(profiles::save))
        .route("/profile/{identity}", get(profiles::get_by_identity))
        .route_layer(middleware::from_fn(auth))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
