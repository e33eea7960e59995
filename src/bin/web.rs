//! Single binary web server: JSON API over the tournament service.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, TOURNAMENT_FORMATS (e.g. "quadrangular,round_robin").

use actix_web::{
    delete, get,
    http::StatusCode,
    post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use doubles_tournament_web::{
    AppConfig, Category, ErrorKind, Gender, InMemoryStorage, MatchId, NewPair, NewPlayer,
    NewTournament, PairId, PairUpdate, PlayerId, PlayerUpdate, TournamentError, TournamentId,
    TournamentService, TournamentStatus, TournamentUpdate,
};
use serde::{Deserialize, Serialize};

/// Shared service over process-local storage.
type AppState = Data<TournamentService<InMemoryStorage>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct StatusBody {
    status: TournamentStatus,
}

#[derive(Deserialize)]
struct ResultBody {
    pair1_score: u32,
    pair2_score: u32,
}

#[derive(Deserialize)]
struct RankingQuery {
    category: Option<Category>,
    gender: Option<Gender>,
}

/// Path segment: entity id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct IdPath {
    id: uuid::Uuid,
}

/// Path segments: tournament id and pair id
#[derive(Deserialize)]
struct TournamentPairPath {
    id: TournamentId,
    pair_id: PairId,
}

/// Path segments: tournament id and match id
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::AlreadyExists => StatusCode::CONFLICT,
        ErrorKind::Precondition | ErrorKind::InvalidTransition | ErrorKind::InvalidRequest => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::UnsupportedFormat | ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map an error to its HTTP status with `{ "error": message }`.
fn error_response(e: TournamentError) -> HttpResponse {
    let status = status_for(e.kind());
    if status.is_server_error() {
        log::error!("{}", e);
    }
    HttpResponse::build(status).json(serde_json::json!({ "error": e.to_string() }))
}

fn respond<T: Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(e),
    }
}

fn no_content(result: Result<(), TournamentError>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "doubles-tournament-web",
    })
}

// ---- players ----

#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<NewPlayer>) -> HttpResponse {
    respond(state.create_player(body.into_inner()))
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    respond(state.list_players())
}

#[get("/api/players/{id}")]
async fn api_get_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.get_player(path.id))
}

#[put("/api/players/{id}")]
async fn api_update_player(state: AppState, path: Path<IdPath>, body: Json<PlayerUpdate>) -> HttpResponse {
    respond(state.update_player(path.id, body.into_inner()))
}

/// Delete a player who is in no pair.
#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    no_content(state.delete_player(path.id))
}

#[get("/api/players/{id}/pairs")]
async fn api_player_pairs(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.pairs_of_player(path.id))
}

/// Career stats for one player.
#[get("/api/players/{id}/standing")]
async fn api_player_standing(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let player_id: PlayerId = path.id;
    respond(state.player_career_stats(player_id))
}

/// Career stats for every player, best match efficiency first.
#[get("/api/player-standings")]
async fn api_all_player_standings(state: AppState) -> HttpResponse {
    respond(state.all_players_career_stats())
}

/// Points ranking, optionally filtered by ?category=...&gender=...
#[get("/api/player-rankings")]
async fn api_player_rankings(state: AppState, query: Query<RankingQuery>) -> HttpResponse {
    respond(state.player_rankings(query.category, query.gender))
}

// ---- pairs ----

#[post("/api/pairs")]
async fn api_create_pair(state: AppState, body: Json<NewPair>) -> HttpResponse {
    respond(state.create_pair(body.into_inner()))
}

#[get("/api/pairs")]
async fn api_list_pairs(state: AppState) -> HttpResponse {
    respond(state.list_pairs())
}

#[get("/api/pairs/{id}")]
async fn api_get_pair(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.get_pair(path.id))
}

/// Replace members and team name (pair must not be entered in a tournament).
#[put("/api/pairs/{id}")]
async fn api_update_pair(state: AppState, path: Path<IdPath>, body: Json<PairUpdate>) -> HttpResponse {
    respond(state.update_pair(path.id, body.into_inner()))
}

#[delete("/api/pairs/{id}")]
async fn api_delete_pair(state: AppState, path: Path<IdPath>) -> HttpResponse {
    no_content(state.delete_pair(path.id))
}

// ---- tournaments ----

#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<NewTournament>) -> HttpResponse {
    respond(state.create_tournament(body.into_inner()))
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    respond(state.list_tournaments())
}

#[get("/api/tournaments/summary")]
async fn api_tournament_summaries(state: AppState) -> HttpResponse {
    respond(state.summaries())
}

/// Get a tournament by id, finishing it first if every match has a result.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.try_finalize(path.id))
}

#[put("/api/tournaments/{id}")]
async fn api_update_tournament(
    state: AppState,
    path: Path<IdPath>,
    body: Json<TournamentUpdate>,
) -> HttpResponse {
    respond(state.update_tournament(path.id, body.into_inner()))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    no_content(state.delete_tournament(path.id))
}

#[get("/api/tournaments/{id}/pairs")]
async fn api_tournament_pairs(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.pairs_in_tournament(path.id))
}

/// Enter a pair (tournament must be Created).
#[post("/api/tournaments/{id}/pairs/{pair_id}")]
async fn api_add_pair(state: AppState, path: Path<TournamentPairPath>) -> HttpResponse {
    respond(state.add_pair_to_tournament(path.id, path.pair_id))
}

/// Withdraw a pair (tournament must be Created).
#[delete("/api/tournaments/{id}/pairs/{pair_id}")]
async fn api_remove_pair(state: AppState, path: Path<TournamentPairPath>) -> HttpResponse {
    respond(state.remove_pair_from_tournament(path.id, path.pair_id))
}

/// Start the tournament (Created -> InProgress) and generate its matches.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.start(path.id))
}

#[put("/api/tournaments/{id}/status")]
async fn api_update_status(state: AppState, path: Path<IdPath>, body: Json<StatusBody>) -> HttpResponse {
    respond(state.update_status(path.id, body.status))
}

/// Administrative finish; fails while any match is pending.
#[post("/api/tournaments/{id}/finalize")]
async fn api_finalize_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.finalize(path.id))
}

#[get("/api/tournaments/{id}/matches")]
async fn api_tournament_matches(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.matches(path.id))
}

/// Record a match score (tournament must be InProgress).
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    respond(state.record_result(path.id, path.match_id, body.pair1_score, body.pair2_score))
}

#[get("/api/tournaments/{id}/standings")]
async fn api_tournament_standings(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.standings(path.id))
}

#[get("/api/tournaments/{id}/progress")]
async fn api_tournament_progress(state: AppState, path: Path<IdPath>) -> HttpResponse {
    respond(state.progress(path.id))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;
    log::info!(
        "Starting server at http://{}:{} (formats: {:?})",
        config.host,
        config.port,
        config.enabled_formats
    );

    let state = Data::new(TournamentService::new(InMemoryStorage::new(), config.selector()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_player)
            .service(api_list_players)
            .service(api_get_player)
            .service(api_update_player)
            .service(api_delete_player)
            .service(api_player_pairs)
            .service(api_player_standing)
            .service(api_all_player_standings)
            .service(api_player_rankings)
            .service(api_create_pair)
            .service(api_list_pairs)
            .service(api_get_pair)
            .service(api_update_pair)
            .service(api_delete_pair)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_tournament_summaries)
            .service(api_get_tournament)
            .service(api_update_tournament)
            .service(api_delete_tournament)
            .service(api_tournament_pairs)
            .service(api_add_pair)
            .service(api_remove_pair)
            .service(api_start_tournament)
            .service(api_update_status)
            .service(api_finalize_tournament)
            .service(api_tournament_matches)
            .service(api_record_result)
            .service(api_tournament_standings)
            .service(api_tournament_progress)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
