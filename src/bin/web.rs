//! Single binary web server: REST API over the bracket engine, tournaments kept in memory.
//! Run with: cargo run --bin web
//! Configured from env: HOST, PORT, MATCH_WRITE_BATCH_SIZE, INACTIVITY_HOURS.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use knockout_bracket::config::ServerConfig;
use knockout_bracket::{
    create_tournament, enroll_participant, preview_stats, report_result, reset_tournament,
    restart_tournament, start_tournament, withdraw_participant, BracketError, MemoryStore,
    ParticipantId, ResultReport, ScoreUpdate, StoreError, TournamentError, TournamentId,
    TournamentStore,
};
use serde::Deserialize;
use std::sync::RwLock;
use std::time::Duration;

/// In-memory state: all tournaments behind one lock, so each store call is atomic.
type AppState = Data<RwLock<MemoryStore>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    max_participants: Option<usize>,
}

#[derive(Deserialize)]
struct EnrollBody {
    name: String,
}

#[derive(Deserialize)]
struct ResultBody {
    winner_id: ParticipantId,
    #[serde(default)]
    scores: ScoreUpdate,
    #[serde(default)]
    disqualified_id: Option<ParticipantId>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and participant id.
#[derive(Deserialize)]
struct TournamentParticipantPath {
    id: TournamentId,
    participant_id: ParticipantId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::Store(StoreError::TournamentNotFound(_))
        | TournamentError::ParticipantNotFound(_)
        | TournamentError::Bracket(BracketError::MatchNotFound(_)) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::InvalidState { .. }
        | TournamentError::Bracket(BracketError::InconsistentState { .. }) => {
            HttpResponse::Conflict().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Respond with the tournament record after a successful mutation.
fn tournament_response(store: &MemoryStore, id: TournamentId) -> HttpResponse {
    match store.tournament(id) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&TournamentError::from(e)),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "knockout-bracket-web",
    })
}

/// Create a new tournament in registration.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match create_tournament(&mut *g, &body.name, body.max_participants) {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Get a tournament by id. Touching it refreshes last activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if let Err(e) = g.touch(path.id) {
        return error_response(&TournamentError::from(e));
    }
    tournament_response(&g, path.id)
}

/// Enroll a participant (registration only).
#[post("/api/tournaments/{id}/participants")]
async fn api_enroll(state: AppState, path: Path<TournamentPath>, body: Json<EnrollBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match enroll_participant(&mut *g, path.id, &body.name) {
        Ok(_) => tournament_response(&g, path.id),
        Err(e) => error_response(&e),
    }
}

/// Remove a participant (registration only).
#[delete("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_withdraw(state: AppState, path: Path<TournamentParticipantPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match withdraw_participant(&mut *g, path.id, &path.participant_id) {
        Ok(_) => tournament_response(&g, path.id),
        Err(e) => error_response(&e),
    }
}

/// Bracket shape for the current enrollment.
#[get("/api/tournaments/{id}/stats")]
async fn api_stats(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match preview_stats(&*g, path.id) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => error_response(&e),
    }
}

/// Generate the bracket and start play.
#[post("/api/tournaments/{id}/start")]
async fn api_start(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match start_tournament(&mut *g, path.id, &mut rand::thread_rng()) {
        Ok(_) => tournament_response(&g, path.id),
        Err(e) => error_response(&e),
    }
}

/// All matches of the bracket, earliest round first.
#[get("/api/tournaments/{id}/matches")]
async fn api_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.matches(path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&TournamentError::from(e)),
    }
}

/// Report a result for one match; the winner advances.
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_report_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let body = body.into_inner();
    let report = ResultReport {
        match_id: path.match_id.clone(),
        winner_id: body.winner_id,
        scores: body.scores,
        disqualified_id: body.disqualified_id,
    };
    match report_result(&mut *g, path.id, &report) {
        Ok(applied) => HttpResponse::Ok().json(applied),
        Err(e) => error_response(&e),
    }
}

/// Discard the bracket and return to registration.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match reset_tournament(&mut *g, path.id) {
        Ok(_) => tournament_response(&g, path.id),
        Err(e) => error_response(&e),
    }
}

/// Discard the bracket and generate a new one with the same participants.
#[post("/api/tournaments/{id}/restart")]
async fn api_restart(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match restart_tournament(&mut *g, path.id, &mut rand::thread_rng()) {
        Ok(_) => tournament_response(&g, path.id),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!(
        "Starting server at http://{}:{} (write batch {})",
        config.host,
        config.port,
        config.write_batch_size
    );

    let state = Data::new(RwLock::new(MemoryStore::new(config.write_batch_size)));

    // Background task: every 30 minutes, remove idle tournaments
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = g.purge_inactive(inactivity_timeout);
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_enroll)
            .service(api_withdraw)
            .service(api_stats)
            .service(api_start)
            .service(api_matches)
            .service(api_report_result)
            .service(api_reset)
            .service(api_restart)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
