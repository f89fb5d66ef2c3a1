//! HTTP boundary: routing, validation, and response rendering.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info, warn};
use serde::Serialize;
use tower_http::timeout::TimeoutLayer;

use crate::client::BridgeClient;
use crate::errors::Error;
use crate::resolver::Group;
use crate::service::LightingService;
use crate::types::LegacyLightId;

type Result<T> = std::result::Result<T, Error>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ROOM_NAME_LEN: usize = 32;

/// Error body shape for every non-2xx response.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Listing shape for `/rooms`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: String,
}

/// Listing shape for `/lights`.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LightSummary {
    pub id: LegacyLightId,
    pub name: String,
    pub room: String,
}

/// Build the full route table around a service.
///
/// Toggle endpoints answer GET and POST; listings and the home page are
/// GET only. Unknown methods and paths get structured JSON errors rather
/// than axum's bare defaults.
pub fn router<C>(service: LightingService<C>) -> Router
where
    C: BridgeClient + Clone + Send + Sync + 'static,
{
    let toggle_light_routes = get(toggle_light).post(toggle_light).fallback(method_not_allowed);
    let toggle_room_routes = get(toggle_room).post(toggle_room).fallback(method_not_allowed);
    // A toggle path without an id segment is a validation error, but only
    // for the methods the endpoint answers at all.
    let missing_light = get(toggle_light_missing)
        .post(toggle_light_missing)
        .fallback(method_not_allowed);
    let missing_room = get(toggle_room_missing)
        .post(toggle_room_missing)
        .fallback(method_not_allowed);

    Router::new()
        .route("/", get(home).fallback(method_not_allowed))
        .route("/groups", get(groups).fallback(method_not_allowed))
        .route("/rooms", get(rooms).fallback(method_not_allowed))
        .route("/lights", get(lights).fallback(method_not_allowed))
        .route("/toggle/light", missing_light.clone())
        .route("/toggle/light/", missing_light)
        .route("/toggle/light/*id", toggle_light_routes)
        .route("/toggle/lights/group", missing_room.clone())
        .route("/toggle/lights/group/", missing_room)
        .route("/toggle/lights/group/*name", toggle_room_routes)
        .fallback(endpoint_not_found)
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(service)
}

/// Bind the listener and serve until the process exits.
pub async fn serve<C>(service: LightingService<C>, port: u16) -> Result<()>
where
    C: BridgeClient + Clone + Send + Sync + 'static,
{
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::server("bind", e))?;

    info!("Starting server on {addr}");
    axum::serve(listener, router(service))
        .await
        .map_err(|e| Error::server("serve", e))
}

/// Validate and normalize a room name taken from the request path.
fn parse_room_name(raw: &str) -> Result<String> {
    let room = raw.trim();
    if room.is_empty() || room.len() > MAX_ROOM_NAME_LEN || room.contains('/') {
        return Err(Error::InvalidRoomName);
    }
    Ok(room.to_string())
}

/// Validate a legacy light id taken from the request path.
fn parse_light_id(raw: &str) -> Result<LegacyLightId> {
    let id = raw.trim();
    if id.is_empty() || id.contains('/') {
        return Err(Error::InvalidLightId);
    }
    id.parse().map_err(|_| Error::InvalidLightId)
}

fn error_status(err: &Error) -> StatusCode {
    match err {
        Error::InvalidRoomName | Error::InvalidLightId => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    if status.is_server_error() {
        error!("{message}");
    } else {
        warn!("{message}");
    }
    (status, Json(ErrorResponse { error: message })).into_response()
}

async fn toggle_light<C>(
    State(service): State<LightingService<C>>,
    Path(raw): Path<String>,
) -> Response
where
    C: BridgeClient + Clone + Send + Sync + 'static,
{
    let result = async {
        let id = parse_light_id(&raw)?;
        service.toggle_light(id).await
    }
    .await;

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(error_status(&err), err.to_string()),
    }
}

async fn toggle_room<C>(
    State(service): State<LightingService<C>>,
    Path(raw): Path<String>,
) -> Response
where
    C: BridgeClient + Clone + Send + Sync + 'static,
{
    let result = async {
        let room = parse_room_name(&raw)?;
        service.toggle_room(&room).await
    }
    .await;

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(error_status(&err), err.to_string()),
    }
}

async fn toggle_light_missing() -> Response {
    error_response(StatusCode::BAD_REQUEST, Error::InvalidLightId.to_string())
}

async fn toggle_room_missing() -> Response {
    error_response(StatusCode::BAD_REQUEST, Error::InvalidRoomName.to_string())
}

async fn groups<C>(State(service): State<LightingService<C>>) -> Response
where
    C: BridgeClient + Clone + Send + Sync + 'static,
{
    match service.groups().await {
        Ok(groups) => Json(groups).into_response(),
        Err(err) => error_response(error_status(&err), err.to_string()),
    }
}

async fn rooms<C>(State(service): State<LightingService<C>>) -> Response
where
    C: BridgeClient + Clone + Send + Sync + 'static,
{
    match service.groups().await {
        Ok(groups) => Json(collect_rooms(&groups)).into_response(),
        Err(err) => error_response(error_status(&err), err.to_string()),
    }
}

async fn lights<C>(State(service): State<LightingService<C>>) -> Response
where
    C: BridgeClient + Clone + Send + Sync + 'static,
{
    match service.groups().await {
        Ok(groups) => Json(collect_lights(&groups)).into_response(),
        Err(err) => error_response(error_status(&err), err.to_string()),
    }
}

async fn home<C>(State(service): State<LightingService<C>>) -> Response
where
    C: BridgeClient + Clone + Send + Sync + 'static,
{
    match service.groups().await {
        Ok(groups) => {
            let page = render_home(&collect_rooms(&groups), &collect_lights(&groups));
            Html(page).into_response()
        }
        Err(err) => error_response(error_status(&err), err.to_string()),
    }
}

async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "method not allowed".to_string(),
    )
}

async fn endpoint_not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "endpoint not found".to_string())
}

/// Flatten a listing into room summaries. Groups arrive name-sorted.
fn collect_rooms(groups: &[Group]) -> Vec<RoomSummary> {
    groups
        .iter()
        .map(|group| RoomSummary {
            name: group.name.clone(),
        })
        .collect()
}

/// Flatten a listing into light summaries sorted by (room, name, id).
fn collect_lights(groups: &[Group]) -> Vec<LightSummary> {
    let mut lights: Vec<LightSummary> = groups
        .iter()
        .flat_map(|group| {
            group.lights.iter().map(|entry| LightSummary {
                id: entry.id,
                name: entry.name.clone(),
                room: group.name.clone(),
            })
        })
        .collect();

    lights.sort_by(|a, b| {
        a.room
            .cmp(&b.room)
            .then_with(|| a.name.cmp(&b.name))
            .then(a.id.cmp(&b.id))
    });
    lights
}

const HOME_STYLE: &str = r#"
    body { font-family: "Trebuchet MS", "Segoe UI", sans-serif; margin: 0; background: #f5f7fa; color: #212b36; }
    .container { max-width: 980px; margin: 0 auto; padding: 24px 18px 36px; }
    h1 { margin: 0 0 8px; }
    .meta { color: #4f5b67; margin-bottom: 16px; }
    .panel { background: #ffffff; border-radius: 10px; padding: 18px; box-shadow: 0 1px 6px rgba(15, 23, 42, 0.08); margin-bottom: 16px; }
    table { width: 100%; border-collapse: collapse; font-size: 14px; }
    th, td { text-align: left; padding: 8px 6px; border-bottom: 1px solid #e6eaef; }
    th { font-size: 13px; text-transform: uppercase; color: #526171; }
    a { color: #0b66d0; text-decoration: none; }
    a:hover { text-decoration: underline; }
    code { background: #f1f4f8; padding: 2px 4px; border-radius: 4px; }
"#;

/// Render the status page: endpoint list, rooms table, lights table.
fn render_home(rooms: &[RoomSummary], lights: &[LightSummary]) -> String {
    let generated_at = chrono::Local::now().to_rfc2822();

    let mut rooms_rows = String::new();
    if rooms.is_empty() {
        rooms_rows.push_str("        <tr><td colspan=\"2\">No rooms found.</td></tr>\n");
    }
    for room in rooms {
        rooms_rows.push_str(&format!(
            "        <tr><td>{}</td><td><code>/toggle/lights/group/{}</code></td></tr>\n",
            escape_html(&room.name),
            urlencoding::encode(&room.name),
        ));
    }

    let mut lights_rows = String::new();
    if lights.is_empty() {
        lights_rows.push_str("        <tr><td colspan=\"4\">No lights found.</td></tr>\n");
    }
    for light in lights {
        lights_rows.push_str(&format!(
            "        <tr><td>{id}</td><td>{name}</td><td>{room}</td><td><code>/toggle/light/{id}</code></td></tr>\n",
            id = light.id,
            name = escape_html(&light.name),
            room = escape_html(&light.room),
        ));
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>hue-toggle</title>
  <style>{HOME_STYLE}</style>
</head>
<body>
  <div class="container">
    <h1>hue-toggle</h1>
    <div class="meta">Generated at {generated_at}</div>
    <div class="panel">
      <h2>Endpoints</h2>
      <p><a href="/groups">/groups</a> full group and light JSON</p>
      <p><a href="/rooms">/rooms</a> room list JSON</p>
      <p><a href="/lights">/lights</a> light list JSON (flattened)</p>
    </div>
    <div class="panel">
      <h2>Rooms</h2>
      <table>
        <thead><tr><th>Room</th><th>Toggle URL</th></tr></thead>
        <tbody>
{rooms_rows}        </tbody>
      </table>
    </div>
    <div class="panel">
      <h2>Lights</h2>
      <table>
        <thead><tr><th>ID</th><th>Name</th><th>Room</th><th>Toggle URL</th></tr></thead>
        <tbody>
{lights_rows}        </tbody>
      </table>
    </div>
  </div>
</body>
</html>"#
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
