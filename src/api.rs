//! REST API over the in-memory tournament store.
//!
//! - `GET    /api/health`
//! - `POST   /api/tournaments`                          create (builds the bracket)
//! - `GET    /api/tournaments/{id}`
//! - `DELETE /api/tournaments/{id}`
//! - `PUT    /api/tournaments/{id}/matches/{match_id}`  scores and/or winner, then propagate
//! - `PUT    /api/tournaments/{id}/config`
//! - `GET    /api/tournaments/{id}/stats`
//!
//! Errors are `{ "error": "..." }` with 400, or 404 for an unknown tournament or match.

use crate::logic::{new_participants, parse_participant_names, shuffle_seeding, TournamentStats};
use crate::models::{
    BracketError, MatchId, MatchUpdate, ParticipantId, Tournament, TournamentConfig, TournamentError,
    TournamentId, TournamentKind,
};
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    HttpResponse, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
pub struct TournamentEntry {
    pub tournament: Tournament,
    pub last_activity: Instant,
}

/// All live tournaments by id. One write lock per request keeps edits to a tournament serialized.
pub type TournamentStore = RwLock<HashMap<TournamentId, TournamentEntry>>;

pub type AppState = Data<TournamentStore>;

pub fn new_state() -> AppState {
    Data::new(RwLock::new(HashMap::new()))
}

/// Drop tournaments not touched within `timeout`. Returns how many were removed.
pub fn remove_inactive(store: &TournamentStore, timeout: Duration) -> usize {
    let mut g = match store.write() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
    before - g.len()
}

/// Register every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_delete_tournament)
        .service(api_update_match)
        .service(api_set_config)
        .service(api_get_stats);
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    kind: TournamentKind,
    /// Names in seeding order.
    #[serde(default)]
    participants: Vec<String>,
    /// Pasted list (newline or comma separated), appended after `participants`.
    #[serde(default)]
    participants_text: Option<String>,
    #[serde(default)]
    shuffle: bool,
    #[serde(default)]
    config: TournamentConfig,
}

#[derive(Deserialize)]
struct MatchEditBody {
    #[serde(default)]
    score_a: Option<u32>,
    #[serde(default)]
    score_b: Option<u32>,
    #[serde(default)]
    winner: Option<ParticipantId>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::Bracket(BracketError::MatchNotFound(_)) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run `f` on the tournament under the write lock, refreshing its last activity time.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => no_tournament(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-bracket-web",
    })
}

/// Create a tournament and its bracket (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut names = body.participants;
    if let Some(text) = &body.participants_text {
        match parse_participant_names(text) {
            Ok(more) => names.extend(more),
            Err(e) => return error_response(&e),
        }
    }

    let mut participants = new_participants(&names, body.kind);
    if body.shuffle {
        shuffle_seeding(&mut participants);
    }

    let tournament = match Tournament::create(body.name, body.kind, participants, body.config) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    log::info!(
        "Created tournament {} ({} participants, {} matches)",
        tournament.id,
        tournament.participants.len(),
        tournament.matches.len()
    );

    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        tournament.id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(t))
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => no_tournament(),
    }
}

/// Record scores and/or a winner for one match and propagate through the bracket.
/// Responds with the ids of the changed matches and the updated tournament.
#[put("/api/tournaments/{id}/matches/{match_id}")]
async fn api_update_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<MatchEditBody>,
) -> HttpResponse {
    let update = MatchUpdate {
        match_id: path.match_id,
        score_a: body.score_a,
        score_b: body.score_b,
        winner: body.winner,
    };
    with_tournament(&state, path.id, |t| match t.apply_update(&update) {
        Ok(touched) => HttpResponse::Ok().json(serde_json::json!({ "touched": touched, "tournament": t })),
        Err(e) => error_response(&e),
    })
}

#[put("/api/tournaments/{id}/config")]
async fn api_set_config(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<TournamentConfig>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.set_config(body.into_inner());
        HttpResponse::Ok().json(t)
    })
}

#[get("/api/tournaments/{id}/stats")]
async fn api_get_stats(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(TournamentStats::from_tournament(t))
    })
}
