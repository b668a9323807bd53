//! Procedure endpoints
//!
//! - GET  /trpc/{procedure}?input=<json>  (queries)
//! - POST /trpc/{procedure}               (mutations, JSON body is the input)

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::extractors::ValidQuery;
use crate::http::server::AppState;
use crate::rpc::{Procedure, ProcedureKind, Reply, RpcResponse};

/// Query string for procedure queries
#[derive(Debug, Default, Deserialize)]
pub struct RpcQueryParams {
    pub input: Option<String>,
}

/// Look up a procedure and check it is called with the right method.
fn resolve(name: &str, called_as: ProcedureKind) -> Result<Procedure, ApiError> {
    let procedure = Procedure::from_name(name).ok_or_else(|| ApiError::NotFound {
        resource: "Procedure",
        id: name.to_owned(),
    })?;

    if procedure.kind() != called_as {
        return Err(ApiError::MethodNotAllowed {
            message: format!(
                "{} is a {}, not a {}",
                procedure.name(),
                procedure.kind().as_str(),
                called_as.as_str()
            ),
        });
    }

    Ok(procedure)
}

fn parse_input(raw: &[u8]) -> Result<Option<Value>, ApiError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(raw)
        .map(Some)
        .map_err(|e| ApiError::InvalidInput {
            message: format!("input is not valid JSON: {}", e),
        })
}

async fn invoke(
    state: &AppState,
    procedure: Procedure,
    input: Option<Value>,
) -> Result<Json<RpcResponse<Reply>>, ApiError> {
    let call = procedure.bind(input)?;
    tracing::debug!(procedure = procedure.name(), "Invoking procedure");

    let reply = call.execute(&state.pool).await?;
    Ok(Json(RpcResponse::new(reply)))
}

/// GET /trpc/{procedure}
async fn run_query(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    ValidQuery(params): ValidQuery<RpcQueryParams>,
) -> Result<Json<RpcResponse<Reply>>, ApiError> {
    let procedure = resolve(&name, ProcedureKind::Query)?;
    let input = match params.input {
        Some(raw) => parse_input(raw.as_bytes())?,
        None => None,
    };

    invoke(&state, procedure, input).await
}

/// POST /trpc/{procedure}
async fn run_mutation(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<RpcResponse<Reply>>, ApiError> {
    let procedure = resolve(&name, ProcedureKind::Mutation)?;
    let input = parse_input(&body)?;

    invoke(&state, procedure, input).await
}

/// Procedure routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/trpc/{procedure}", get(run_query).post(run_mutation))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_checks_method() {
        assert_eq!(
            resolve("categories", ProcedureKind::Query).unwrap(),
            Procedure::Categories
        );
        assert!(matches!(
            resolve("categories", ProcedureKind::Mutation),
            Err(ApiError::MethodNotAllowed { .. })
        ));
        assert!(matches!(
            resolve("addComment", ProcedureKind::Query),
            Err(ApiError::MethodNotAllowed { .. })
        ));
        assert!(matches!(
            resolve("nope", ProcedureKind::Query),
            Err(ApiError::NotFound { .. })
        ));
    }

    #[test]
    fn blank_input_is_none() {
        assert_eq!(parse_input(b"").unwrap(), None);
        assert_eq!(parse_input(b"  \n").unwrap(), None);
        assert_eq!(parse_input(br#""slug""#).unwrap(), Some(Value::from("slug")));
        assert!(parse_input(b"{nope").is_err());
    }
}
