//! Single binary web server: JSON API for the team picker and the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, TEAM_POOL_CSV, SESSION_TTL_HOURS.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use party_cup::logic::{generate_knockout_from_groups, leagues, slot_teams};
use party_cup::models::load_team_pool_from_path;
use party_cup::{
    pick_teams, set_score_input, start_tournament, tournament_view, Assignment, PickerSettings,
    ScoreField, ServerConfig, TeamRecord, Tournament, TournamentConfig, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// Last spin of one browser + last activity time (for auto-cleanup).
struct SpinEntry {
    assignments: Vec<Assignment>,
    last_activity: Instant,
}

/// Shared server state. Tournaments and last spins live in memory only.
struct ServerState {
    tournaments: RwLock<HashMap<TournamentId, TournamentEntry>>,
    /// Last spin per browser (keyed by the id kept in the cookie session).
    last_spins: RwLock<HashMap<Uuid, SpinEntry>>,
    team_pool: Vec<TeamRecord>,
}

type AppState = Data<ServerState>;

const SESSION_BROWSER_ID: &str = "browser_id";
const SESSION_PICKER_SETTINGS: &str = "picker_settings";

/// How often idle tournaments are swept.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct League {
    id: String,
    name: String,
}

#[derive(serde::Serialize)]
struct TeamsResponse<'a> {
    leagues: Vec<League>,
    teams: &'a [TeamRecord],
}

#[derive(Deserialize)]
struct SpinBody {
    #[serde(default)]
    settings: Option<PickerSettings>,
    /// Slots that keep their team from the previous spin.
    #[serde(default)]
    locked_slots: Vec<usize>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    config: TournamentConfig,
    /// Defaults to this browser's last spin.
    #[serde(default)]
    assignments: Option<Vec<Assignment>>,
}

#[derive(Deserialize)]
struct SetScoreBody {
    id: String,
    field: ScoreField,
    #[serde(default)]
    value: serde_json::Value,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Browser id from the cookie session, created on first use.
fn browser_id(session: &Session) -> Uuid {
    match session.get::<Uuid>(SESSION_BROWSER_ID) {
        Ok(Some(id)) => id,
        _ => {
            let id = Uuid::new_v4();
            if let Err(e) = session.insert(SESSION_BROWSER_ID, id) {
                log::warn!("Could not store browser id in session: {}", e);
            }
            id
        }
    }
}

fn picker_settings(session: &Session) -> PickerSettings {
    session
        .get::<PickerSettings>(SESSION_PICKER_SETTINGS)
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Run `f` on a tournament (404 if unknown) and answer with the updated view.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), party_cup::TournamentError>,
{
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match f(t) {
        Ok(()) => HttpResponse::Ok().json(tournament_view(t)),
        Err(e) => bad_request(e),
    }
}

/// Remove entries idle for `ttl` or longer at `now`; returns how many went.
fn drop_idle<K, V, F>(map: &mut HashMap<K, V>, now: Instant, ttl: Duration, last_activity: F) -> usize
where
    F: Fn(&V) -> Instant,
{
    let before = map.len();
    map.retain(|_, entry| now.saturating_duration_since(last_activity(entry)) < ttl);
    before - map.len()
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "party-cup",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Team pool and the leagues it covers.
#[get("/api/teams")]
async fn api_teams(state: AppState) -> HttpResponse {
    let leagues = leagues(&state.team_pool)
        .into_iter()
        .map(|(id, name)| League { id, name })
        .collect();
    HttpResponse::Ok().json(TeamsResponse {
        leagues,
        teams: &state.team_pool,
    })
}

/// Picker settings remembered for this browser (defaults if none).
#[get("/api/picker/settings")]
async fn api_get_picker_settings(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(picker_settings(&session))
}

/// Remember picker settings for this browser.
#[put("/api/picker/settings")]
async fn api_set_picker_settings(session: Session, body: Json<PickerSettings>) -> HttpResponse {
    let settings = body.into_inner();
    match session.insert(SESSION_PICKER_SETTINGS, &settings) {
        Ok(()) => HttpResponse::Ok().json(settings),
        Err(e) => bad_request(e),
    }
}

/// Forget picker settings and the last spin for this browser.
#[delete("/api/picker/settings")]
async fn api_reset_picker_settings(state: AppState, session: Session) -> HttpResponse {
    session.remove(SESSION_PICKER_SETTINGS);
    let id = browser_id(&session);
    if let Ok(mut spins) = state.last_spins.write() {
        spins.remove(&id);
    }
    HttpResponse::Ok().json(PickerSettings::default())
}

/// Spin teams; locked slots keep the team they had in this browser's last spin.
#[post("/api/picker/spin")]
async fn api_spin(state: AppState, session: Session, body: Json<SpinBody>) -> HttpResponse {
    let body = body.into_inner();
    let settings = body.settings.unwrap_or_else(|| picker_settings(&session));
    let id = browser_id(&session);

    let mut spins = match state.last_spins.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let previous = spins
        .get(&id)
        .map(|spin| slot_teams(&spin.assignments))
        .unwrap_or_default();
    // More slots than teams fails in the picker; no need to build locks for them.
    let slots = settings.slots().min(state.team_pool.len());
    let locked: Vec<Option<TeamRecord>> = (0..slots)
        .map(|slot| {
            body.locked_slots
                .contains(&slot)
                .then(|| previous.get(slot).cloned())
                .flatten()
        })
        .collect();

    match pick_teams(&state.team_pool, &settings, &locked) {
        Ok(assignments) => {
            if let Err(e) = session.insert(SESSION_PICKER_SETTINGS, &settings) {
                log::warn!("Could not store picker settings in session: {}", e);
            }
            spins.insert(
                id,
                SpinEntry {
                    assignments: assignments.clone(),
                    last_activity: Instant::now(),
                },
            );
            HttpResponse::Ok().json(assignments)
        }
        Err(e) => bad_request(e),
    }
}

/// Create a tournament from assignments (or this browser's last spin).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let assignments = match body.assignments {
        Some(a) => a,
        None => {
            let id = browser_id(&session);
            match state.last_spins.read() {
                Ok(spins) => spins
                    .get(&id)
                    .map(|spin| spin.assignments.clone())
                    .unwrap_or_default(),
                Err(_) => return lock_error(),
            }
        }
    };

    let tournament = match start_tournament(body.config, assignments) {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    let id = tournament.id;
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(tournament_view(&entry.tournament))
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Clear a tournament.
#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(),
    }
}

/// Score edit on any match or tie; returns the recomputed view.
#[put("/api/tournaments/{id}/scores")]
async fn api_set_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetScoreBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        set_score_input(t, &body.id, body.field, &body.value)
    })
}

/// Build the knockout from the current group tables.
#[post("/api/tournaments/{id}/knockout")]
async fn api_generate_knockout(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, generate_knockout_from_groups)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let team_pool = match load_team_pool_from_path(&config.team_pool_csv) {
        Ok(pool) => {
            log::info!(
                "Loaded {} teams from {}",
                pool.len(),
                config.team_pool_csv.display()
            );
            pool
        }
        Err(e) => {
            log::warn!(
                "Could not load team pool from {}: {}; starting with an empty pool",
                config.team_pool_csv.display(),
                e
            );
            Vec::new()
        }
    };

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(ServerState {
        tournaments: RwLock::new(HashMap::new()),
        last_spins: RwLock::new(HashMap::new()),
        team_pool,
    });

    // Background task: periodically remove tournaments and spins idle for longer than the TTL
    let state_cleanup = state.clone();
    let ttl = config.session_ttl;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let now = Instant::now();
            if let Ok(mut g) = state_cleanup.tournaments.write() {
                let removed = drop_idle(&mut *g, now, ttl, |e: &TournamentEntry| e.last_activity);
                if removed > 0 {
                    log::info!("Cleaned up {} inactive tournament(s)", removed);
                }
            }
            if let Ok(mut spins) = state_cleanup.last_spins.write() {
                let removed = drop_idle(&mut *spins, now, ttl, |e: &SpinEntry| e.last_activity);
                if removed > 0 {
                    log::info!("Cleaned up {} inactive spin(s)", removed);
                }
            }
        }
    });

    let key = Key::generate();
    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_teams)
            .service(api_get_picker_settings)
            .service(api_set_picker_settings)
            .service(api_reset_picker_settings)
            .service(api_spin)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_set_score)
            .service(api_generate_knockout)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}
