//! HTTP handlers: the tiled-WMS entry point and its JSON variant.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::Response,
};
use serde_json::json;
use tracing::{debug, instrument};

use twms_core::{BoundingBox, TwmsError};

use crate::endpoint_config::Endpoint;
use crate::state::AppState;

/// Generate a WMS-formatted exception response.
fn wms_exception(code: &str, msg: &str, status: StatusCode) -> Response {
    let xml = format!(
        r#"<?xml version="1.0"?><ServiceExceptionReport><ServiceException code="{}">{}</ServiceException></ServiceExceptionReport>"#,
        code, msg
    );
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/xml")
        .body(xml.into())
        .unwrap()
}

fn json_response(status: StatusCode, body: serde_json::Value) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.to_string().into())
        .unwrap()
}

fn resolve_error(err: &TwmsError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let code = match err {
        TwmsError::MissingParameter(_) => "MissingParameterValue",
        TwmsError::MalformedBoundingBox(_) => "InvalidParameterValue",
        _ => "TileOutOfRange",
    };
    wms_exception(code, &err.to_string(), status)
}

/// WMS query parameters are case-insensitive by convention; clients send
/// `bbox`, `BBOX` and everything in between.
fn bbox_param(params: &HashMap<String, String>) -> Result<BoundingBox, TwmsError> {
    let raw = params
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("bbox"))
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| TwmsError::MissingParameter("bbox".to_string()))?;
    BoundingBox::parse(raw)
}

fn endpoint_or_404<'a>(state: &'a AppState, name: &str) -> Result<&'a Endpoint, Response> {
    state.endpoints.get(name).ok_or_else(|| {
        wms_exception(
            "LayerNotDefined",
            &format!("no endpoint named '{}'", name),
            StatusCode::NOT_FOUND,
        )
    })
}

/// Tiled-WMS entry point. Resolves the request bbox against the
/// endpoint's pyramid and redirects to the backing tile service, or
/// answers with the address itself when no SourcePath is configured.
#[instrument(skip(state, params))]
pub async fn twms_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(endpoint): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let endpoint = match endpoint_or_404(&state, &endpoint) {
        Ok(e) => e,
        Err(resp) => return resp,
    };

    let bbox = match bbox_param(&params) {
        Ok(bbox) => bbox,
        Err(err) => return resolve_error(&err),
    };

    let tile = match endpoint.raster.resolve(&bbox) {
        Ok(tile) => tile,
        Err(err) => {
            debug!(endpoint = %endpoint.name, ?bbox, %err, "request declined");
            return resolve_error(&err);
        }
    };

    match endpoint.tile_location(&tile) {
        Some(location) => Response::builder()
            .status(StatusCode::FOUND)
            .header(header::LOCATION, location)
            .body(axum::body::Body::empty())
            .unwrap(),
        None => tile_json(endpoint, &tile),
    }
}

/// JSON variant of the entry point, for integrations that want the
/// address rather than a redirect.
#[instrument(skip(state, params))]
pub async fn tile_json_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(endpoint): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let endpoint = match endpoint_or_404(&state, &endpoint) {
        Ok(e) => e,
        Err(resp) => return resp,
    };

    let bbox = match bbox_param(&params) {
        Ok(bbox) => bbox,
        Err(err) => return resolve_error(&err),
    };

    match endpoint.raster.resolve(&bbox) {
        Ok(tile) => tile_json(endpoint, &tile),
        Err(err) => resolve_error(&err),
    }
}

fn tile_json(endpoint: &Endpoint, tile: &twms_core::TileAddress) -> Response {
    json_response(
        StatusCode::OK,
        json!({
            "endpoint": endpoint.name,
            "level": tile.exposed_level(&endpoint.raster),
            "col": tile.col,
            "row": tile.row,
        }),
    )
}

/// Liveness probe.
pub async fn health_handler() -> Response {
    json_response(StatusCode::OK, json!({ "status": "ok" }))
}
