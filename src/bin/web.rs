//! Single binary web server: JSON API over the padel tournament library.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, SESSION_TTL_HOURS (default 12), SECURE_COOKIES (default false).
//!
//! Each browser session (cookie) gets its own set of tournaments. Sessions idle for longer
//! than the TTL are dropped.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_tournament::{
    compute_standings, create_tournament, edit_players, ensure_first_round, generate_round,
    standings_csv, summarize, MemoryRepository, NewTournament, TournamentError, TournamentId,
    TournamentRepository, TournamentUpdate,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Cookie key holding the session id.
const SESSION_KEY: &str = "session_id";

/// Per-session entry: that session's tournaments + last activity time (for auto-cleanup).
struct SessionEntry {
    repo: MemoryRepository,
    last_activity: Instant,
}

/// In-memory state: one repository per session id.
type AppState = Data<RwLock<HashMap<Uuid, SessionEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct EditPlayersBody {
    players: Vec<String>,
}

#[derive(Deserialize)]
struct SubmitScoreBody {
    #[serde(default)]
    score1: Option<u32>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id}/score)
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Session id from the cookie, assigning a fresh one on first contact.
fn session_id(session: &Session) -> Result<Uuid, actix_web::Error> {
    if let Some(id) = session.get::<Uuid>(SESSION_KEY)? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(SESSION_KEY, id)?;
    log::debug!("New session {}", id);
    Ok(id)
}

/// Run `f` against this session's repository. Touching it refreshes last_activity.
fn with_repo<F>(state: &AppState, session: &Session, f: F) -> HttpResponse
where
    F: FnOnce(&mut MemoryRepository) -> HttpResponse,
{
    let sid = match session_id(session) {
        Ok(sid) => sid,
        Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(sid).or_insert_with(|| SessionEntry {
        repo: MemoryRepository::new(),
        last_activity: Instant::now(),
    });
    entry.last_activity = Instant::now();
    f(&mut entry.repo)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// List this session's tournaments.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, session: Session) -> HttpResponse {
    with_repo(&state, &session, |repo| HttpResponse::Ok().json(repo.list()))
}

/// Create a tournament from the creation form (no rounds yet).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, session: Session, body: Json<NewTournament>) -> HttpResponse {
    with_repo(&state, &session, |repo| match create_tournament(body.into_inner()) {
        Ok(t) => {
            repo.upsert(t.clone());
            HttpResponse::Ok().json(t)
        }
        Err(e) => bad_request(e),
    })
}

/// Remove every tournament of this session.
#[delete("/api/tournaments")]
async fn api_clear_tournaments(state: AppState, session: Session) -> HttpResponse {
    with_repo(&state, &session, |repo| {
        repo.clear();
        HttpResponse::NoContent().finish()
    })
}

/// Get a tournament by id. Generates round 1 the first time it is viewed without rounds.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    with_repo(&state, &session, |repo| {
        let mut t = match repo.get(path.id) {
            Some(t) => t,
            None => return not_found(),
        };
        if ensure_first_round(&mut t, &mut rand::thread_rng()) {
            repo.upsert(t.clone());
        }
        HttpResponse::Ok().json(t)
    })
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    with_repo(&state, &session, |repo| match repo.delete(path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(),
    })
}

/// Replace the player list (past rounds untouched).
#[put("/api/tournaments/{id}/players")]
async fn api_edit_players(
    state: AppState,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<EditPlayersBody>,
) -> HttpResponse {
    with_repo(&state, &session, |repo| {
        let mut t = match repo.get(path.id) {
            Some(t) => t,
            None => return not_found(),
        };
        if let Err(e) = edit_players(&mut t, body.into_inner().players) {
            return bad_request(e);
        }
        match repo.apply(path.id, TournamentUpdate::Players(t.players)) {
            Ok(t) => HttpResponse::Ok().json(t),
            Err(e) => bad_request(e),
        }
    })
}

/// Generate and append the next round.
#[post("/api/tournaments/{id}/rounds")]
async fn api_generate_round(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    with_repo(&state, &session, |repo| {
        let mut t = match repo.get(path.id) {
            Some(t) => t,
            None => return not_found(),
        };
        if let Err(e) = generate_round(&mut t, &mut rand::thread_rng()) {
            return bad_request(e);
        }
        match repo.apply(path.id, TournamentUpdate::Rounds(t.rounds)) {
            Ok(t) => HttpResponse::Ok().json(t),
            Err(e) => bad_request(e),
        }
    })
}

/// Submit team 1's score for a match; team 2's score is derived from the target.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_submit_score(
    state: AppState,
    session: Session,
    path: Path<TournamentMatchPath>,
    body: Json<SubmitScoreBody>,
) -> HttpResponse {
    with_repo(&state, &session, |repo| {
        let mut t = match repo.get(path.id) {
            Some(t) => t,
            None => return not_found(),
        };
        if let Err(e) = t.submit_score(&path.match_id, body.score1) {
            return bad_request(e);
        }
        match repo.apply(path.id, TournamentUpdate::Rounds(t.rounds)) {
            Ok(t) => HttpResponse::Ok().json(t),
            Err(e) => bad_request(e),
        }
    })
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    with_repo(&state, &session, |repo| match repo.get(path.id) {
        Some(t) => HttpResponse::Ok().json(compute_standings(&t.players, &t.rounds)),
        None => not_found(),
    })
}

/// Leaderboard as a CSV download.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    with_repo(&state, &session, |repo| {
        let t = match repo.get(path.id) {
            Some(t) => t,
            None => return not_found(),
        };
        match standings_csv(&compute_standings(&t.players, &t.rounds)) {
            Ok(body) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"standings-{}.csv\"", t.id),
                ))
                .body(body),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
        }
    })
}

/// Podium, totals and final standings.
#[get("/api/tournaments/{id}/summary")]
async fn api_summary(state: AppState, session: Session, path: Path<TournamentPath>) -> HttpResponse {
    with_repo(&state, &session, |repo| match repo.get(path.id) {
        Some(t) => HttpResponse::Ok().json(summarize(&t)),
        None => not_found(),
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_ttl_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let ttl_hours: u64 = std::env::var("SESSION_TTL_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_session_ttl_hours);
    let secure_cookies = std::env::var("SECURE_COOKIES")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let session_ttl = Duration::from_secs(ttl_hours * 3600);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<Uuid, SessionEntry>::new()));
    let key = Key::generate();

    // Background task: every 30 minutes, remove sessions inactive for longer than the TTL
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < session_ttl);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for {}h)", removed, ttl_hours);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(secure_cookies)
                    .build(),
            )
            .app_data(state.clone())
            .service(api_health)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_clear_tournaments)
            .service(api_standings_csv)
            .service(api_standings)
            .service(api_summary)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_edit_players)
            .service(api_generate_round)
            .service(api_submit_score)
    })
    .bind(bind)?
    .run()
    .await
}
