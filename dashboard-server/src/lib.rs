use serde::Deserialize;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use dashboard_persistence::DocumentStore;
use dashboard_persistence::repositories::WarMapRepository;
use dashboard_types::{DashboardError, Document, ErrorKind, MapDifficulty};

pub mod config;

/// Documents carry background images as data URLs, so bodies can be large.
const MAX_DOCUMENT_BYTES: u64 = 16 * 1024 * 1024;
const MAX_REQUEST_BYTES: u64 = 64 * 1024;

#[derive(Deserialize)]
struct TacticBody {
    tactic: String,
    notes: Option<String>,
}

#[derive(Deserialize)]
struct GlobalTacticRequest {
    difficulty: MapDifficulty,
    tactic: TacticBody,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeTacticBody {
    node_number: u32,
    tactic: String,
    notes: Option<String>,
}

#[derive(Deserialize)]
struct NodeTacticRequest {
    difficulty: MapDifficulty,
    tactic: NodeTacticBody,
}

#[derive(Deserialize)]
struct DifficultyRequest {
    difficulty: MapDifficulty,
}

/// Any `id` sent by the client is ignored; the server assigns one.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChampionBanRequest {
    champion_id: String,
    map_difficulty: MapDifficulty,
}

pub fn create_routes(
    store: Arc<DocumentStore>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let war_map = Arc::new(WarMapRepository::new(store.clone()));

    let store_filter = warp::any().map({
        let store = store.clone();
        move || store.clone()
    });

    let war_map_filter = warp::any().map({
        let war_map = war_map.clone();
        move || war_map.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Whole-document endpoints
    let get_document = warp::path!("api" / "db")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(handle_get_document);

    let save_document = warp::path!("api" / "save-db")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_DOCUMENT_BYTES))
        .and(warp::body::json())
        .and(store_filter.clone())
        .and_then(handle_save_document);

    // War map endpoints
    let get_war_map = warp::path!("api" / "war-map")
        .and(warp::get())
        .and(war_map_filter.clone())
        .and_then(handle_get_war_map);

    let global_tactic = warp::path!("api" / "war-map" / "global-tactic")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_REQUEST_BYTES))
        .and(warp::body::json())
        .and(war_map_filter.clone())
        .and_then(handle_global_tactic);

    let node_tactic = warp::path!("api" / "war-map" / "node-tactic")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_REQUEST_BYTES))
        .and(warp::body::json())
        .and(war_map_filter.clone())
        .and_then(handle_node_tactic);

    let difficulty = warp::path!("api" / "war-map" / "difficulty")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_REQUEST_BYTES))
        .and(warp::body::json())
        .and(war_map_filter.clone())
        .and_then(handle_difficulty);

    let add_ban = warp::path!("api" / "war-map" / "champion-ban")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_REQUEST_BYTES))
        .and(warp::body::json())
        .and(war_map_filter.clone())
        .and_then(handle_add_ban);

    let remove_ban = warp::path!("api" / "war-map" / "champion-ban" / String)
        .and(warp::delete())
        .and(war_map_filter.clone())
        .and_then(handle_remove_ban);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "DELETE"]);

    health
        .or(get_document)
        .or(save_document)
        .or(get_war_map)
        .or(global_tactic)
        .or(node_tactic)
        .or(difficulty)
        .or(add_ban)
        .or(remove_ban)
        .with(cors)
        .with(warp::log("alliance_dashboard"))
}

fn status_for(err: &DashboardError) -> StatusCode {
    match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_reply(err: &DashboardError) -> WithStatus<Json> {
    let status = status_for(err);
    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::debug!("Request rejected: {}", err);
    }

    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": err.to_string()
        })),
        status,
    )
}

fn json_reply<T: serde::Serialize>(
    result: Result<T, DashboardError>,
) -> Result<WithStatus<Json>, warp::Rejection> {
    Ok(match result {
        Ok(value) => warp::reply::with_status(warp::reply::json(&value), StatusCode::OK),
        Err(err) => error_reply(&err),
    })
}

async fn handle_get_document(
    store: Arc<DocumentStore>,
) -> Result<impl warp::Reply, warp::Rejection> {
    json_reply(store.load().await)
}

async fn handle_save_document(
    document: Document,
    store: Arc<DocumentStore>,
) -> Result<impl warp::Reply, warp::Rejection> {
    match store.save(document).await {
        Ok(()) => Ok(warp::reply::with_status(
            warp::reply::json(&serde_json::json!({ "success": true })),
            StatusCode::OK,
        )),
        Err(err) => {
            tracing::error!("Failed to save document: {}", err);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "success": false,
                    "error": err.to_string()
                })),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_get_war_map(
    war_map: Arc<WarMapRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    json_reply(war_map.get_war_map().await)
}

async fn handle_global_tactic(
    request: GlobalTacticRequest,
    war_map: Arc<WarMapRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let GlobalTacticRequest { difficulty, tactic } = request;
    json_reply(
        war_map
            .set_global_tactic(difficulty, &tactic.tactic, tactic.notes.as_deref())
            .await,
    )
}

async fn handle_node_tactic(
    request: NodeTacticRequest,
    war_map: Arc<WarMapRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let NodeTacticRequest { difficulty, tactic } = request;
    json_reply(
        war_map
            .set_node_tactic(
                difficulty,
                tactic.node_number,
                &tactic.tactic,
                tactic.notes.as_deref(),
            )
            .await,
    )
}

async fn handle_difficulty(
    request: DifficultyRequest,
    war_map: Arc<WarMapRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = war_map
        .set_map_difficulty(request.difficulty)
        .await
        .map(|()| serde_json::json!({ "success": true, "difficulty": request.difficulty }));
    json_reply(result)
}

async fn handle_add_ban(
    request: ChampionBanRequest,
    war_map: Arc<WarMapRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    json_reply(
        war_map
            .add_champion_ban(request.map_difficulty, &request.champion_id)
            .await,
    )
}

async fn handle_remove_ban(
    ban_id: String,
    war_map: Arc<WarMapRepository>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = war_map
        .remove_champion_ban(&ban_id)
        .await
        .map(|removed| serde_json::json!({ "success": true, "removed": removed.is_some() }));
    json_reply(result)
}
