//! Request handlers for the export function

use super::error::ApiError;
use super::state::AppState;
use crate::core::orchestrator::{ExportCommand, ExportOutcome};
use crate::domain::{SweepReport, TenantExportResult};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

/// Decide the command from the request headers
///
/// No `Authorization` header means sweep mode. A header that is not a
/// non-empty `Bearer` credential is rejected.
pub fn command_from_headers(headers: &HeaderMap) -> Result<ExportCommand, ApiError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(ExportCommand::Sweep);
    };

    let value = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Authorization header is not valid text".into()))?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| ApiError::Unauthorized("Authorization header must be 'Bearer <token>'".into()))?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(ApiError::Unauthorized(
            "Authorization header must be 'Bearer <token>'".into(),
        ));
    }

    Ok(ExportCommand::Manual {
        credential: token.trim().to_string(),
    })
}

/// `GET|POST /export` and `/`
pub async fn export(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let command = command_from_headers(&headers)?;

    match state.orchestrator().execute(command).await? {
        ExportOutcome::Manual(result) => manual_response(&result).map(Json),
        ExportOutcome::Sweep(report) => Ok(Json(sweep_response(&report))),
    }
}

/// `OPTIONS` on the export routes: empty 200, CORS headers come from the layer
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Body of a successful manual export; undelivered bundles become a 500
pub fn manual_response(result: &TenantExportResult) -> Result<Value, ApiError> {
    if !result.delivered {
        return Err(ApiError::Internal(
            result
                .delivery_error
                .clone()
                .unwrap_or_else(|| "delivery failed".to_string()),
        ));
    }

    let message = if result.attachments.is_empty() && result.table_errors.is_empty() {
        "No data to export".to_string()
    } else {
        format!("Export sent to {}", result.recipient_address)
    };

    let mut body = json!({
        "message": message,
        "tablesExported": result.row_counts.len(),
    });
    if !result.table_errors.is_empty() {
        body["tableErrors"] = json!(result
            .table_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>());
    }
    Ok(body)
}

/// Body of a sweep report
pub fn sweep_response(report: &SweepReport) -> Value {
    json!({
        "message": format!("Sweep completed: {} tenants processed", report.processed()),
        "results": report.results,
        "succeeded": report.succeeded(),
        "failed": report.failed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExportAttachment, SweepEntry, TableError, TenantId};
    use axum::http::HeaderValue;

    fn headers(auth: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(auth));
        headers
    }

    #[test]
    fn test_no_header_is_sweep() {
        assert_eq!(
            command_from_headers(&HeaderMap::new()).unwrap(),
            ExportCommand::Sweep
        );
    }

    #[test]
    fn test_bearer_header_is_manual() {
        assert_eq!(
            command_from_headers(&headers("Bearer abc.def")).unwrap(),
            ExportCommand::Manual {
                credential: "abc.def".to_string()
            }
        );
        assert!(matches!(
            command_from_headers(&headers("bearer abc")).unwrap(),
            ExportCommand::Manual { .. }
        ));
    }

    #[test]
    fn test_malformed_header_is_unauthorized() {
        for value in ["Basic dXNlcjpwdw==", "Bearer", "Bearer   ", "token"] {
            let err = command_from_headers(&headers(value)).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED, "{value}");
        }
    }

    #[test]
    fn test_manual_response_shape() {
        let mut result = TenantExportResult::new(TenantId::new("t1").unwrap(), "a@example.com");
        result.add_table("invoices", 2, ExportAttachment::for_table("invoices", vec![]));
        result.add_table_error(TableError::new("payments", "boom"));
        result.delivered = true;

        let body = manual_response(&result).unwrap();
        assert_eq!(body["tablesExported"], 1);
        assert_eq!(body["tableErrors"], json!(["payments: boom"]));
    }

    #[test]
    fn test_manual_response_delivery_failure() {
        let mut result = TenantExportResult::new(TenantId::new("t1").unwrap(), "a@example.com");
        result.add_table("invoices", 2, ExportAttachment::for_table("invoices", vec![]));
        result.delivery_error = Some("Delivery error: 500".to_string());

        let err = manual_response(&result).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_sweep_response_counts() {
        let mut report = SweepReport::new();
        report.push(SweepEntry::succeeded("a@example.com"));
        report.push(SweepEntry::failed("c@example.com", "boom"));

        let body = sweep_response(&report);
        assert_eq!(body["succeeded"], 1);
        assert_eq!(body["failed"], 1);
        assert_eq!(body["results"][1]["error"], "boom");
        assert!(body["results"][0].get("error").is_none());
    }
}
