//! Single binary web server: JSON REST API around the fixture and standings engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, INACTIVITY_HOURS (idle tournaments are dropped after this long).

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use league_fixtures::{
    parse_roster, write_standings_csv, GroupId, GroupKey, MatchStatus, PointSystem,
    ScheduleParams, StandingsRow, Tournament, TournamentError, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

type Tournaments = HashMap<TournamentId, TournamentEntry>;

/// In-memory state: many tournaments by ID. Idle entries are removed periodically.
type AppState = Data<RwLock<Tournaments>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct AssignGroupBody {
    group_id: Option<GroupId>,
}

#[derive(Deserialize)]
struct ResultBody {
    home_score: u32,
    away_score: u32,
}

#[derive(Deserialize)]
struct StatusBody {
    status: MatchStatus,
}

/// Optional point values for the standings endpoints (?win=3&draw=1&loss=0).
#[derive(Deserialize)]
struct PointsQuery {
    win: Option<u32>,
    draw: Option<u32>,
    loss: Option<u32>,
}

impl PointsQuery {
    fn points(&self) -> PointSystem {
        let d = PointSystem::default();
        PointSystem {
            win: self.win.unwrap_or(d.win),
            draw: self.draw.unwrap_or(d.draw),
            loss: self.loss.unwrap_or(d.loss),
        }
    }
}

/// One table in the JSON standings response.
#[derive(Serialize)]
struct GroupTable {
    group: GroupKey,
    group_name: String,
    rows: Vec<StandingsRow>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: Uuid,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: Uuid,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Look up a tournament and refresh its activity time.
fn touch<'a>(
    g: &'a mut RwLockWriteGuard<'_, Tournaments>,
    id: &TournamentId,
) -> Option<&'a mut Tournament> {
    g.get_mut(id).map(|entry| {
        entry.last_activity = Instant::now();
        &mut entry.tournament
    })
}

/// Answer with one tournament, refreshing its activity time.
fn view(state: &AppState, id: &TournamentId) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match touch(&mut g, id) {
        Some(t) => HttpResponse::Ok().json(&*t),
        None => not_found(),
    }
}

/// Run a mutation on one tournament and answer with the updated tournament.
fn mutate<T>(
    state: &AppState,
    id: &TournamentId,
    op: impl FnOnce(&mut Tournament) -> Result<T, TournamentError>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = touch(&mut g, id) else {
        return not_found();
    };
    match op(&mut *t) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-fixtures",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<CreateTournamentBody>>) -> HttpResponse {
    let name = body.map(|b| b.into_inner().name).unwrap_or_default();
    let tournament = Tournament::new(name);
    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
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
    view(&state, &path.id)
}

/// Add a team (Setup only).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<TournamentPath>, body: Json<NameBody>) -> HttpResponse {
    mutate(&state, &path.id, |t| t.add_team(body.name.as_str()))
}

/// Remove a team by id (Setup only).
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    mutate(&state, &path.id, |t| t.remove_team(path.team_id))
}

/// Upload a CSV roster (`name,group` with header) as the raw request body.
#[post("/api/tournaments/{id}/roster")]
async fn api_import_roster(state: AppState, path: Path<TournamentPath>, body: Bytes) -> HttpResponse {
    let entries = match parse_roster(body.as_ref()) {
        Ok(entries) => entries,
        Err(e) => return bad_request(e),
    };
    mutate(&state, &path.id, |t| t.import_roster(&entries))
}

#[post("/api/tournaments/{id}/groups")]
async fn api_add_group(state: AppState, path: Path<TournamentPath>, body: Json<NameBody>) -> HttpResponse {
    mutate(&state, &path.id, |t| t.add_group(body.name.as_str()))
}

/// Assign a team to a group; `{"group_id": null}` makes it ungrouped.
#[put("/api/tournaments/{id}/teams/{team_id}/group")]
async fn api_assign_group(
    state: AppState,
    path: Path<TournamentTeamPath>,
    body: Json<AssignGroupBody>,
) -> HttpResponse {
    mutate(&state, &path.id, |t| t.assign_team(path.team_id, body.group_id))
}

/// Generate the fixture list (Setup -> InProgress).
#[post("/api/tournaments/{id}/fixtures/generate")]
async fn api_generate_fixtures(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScheduleParams>,
) -> HttpResponse {
    mutate(&state, &path.id, |t| t.generate_fixtures(&body))
}

/// Drop all fixtures and results (InProgress -> Setup).
#[post("/api/tournaments/{id}/fixtures/reset")]
async fn api_reset_fixtures(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    mutate(&state, &path.id, |t| t.reset_fixtures())
}

#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    mutate(&state, &path.id, |t| {
        t.record_result(path.match_id, body.home_score, body.away_score)
    })
}

#[put("/api/tournaments/{id}/matches/{match_id}/status")]
async fn api_set_match_status(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<StatusBody>,
) -> HttpResponse {
    mutate(&state, &path.id, |t| t.set_match_status(path.match_id, body.status))
}

/// Current standings, one table per group.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(
    state: AppState,
    path: Path<TournamentPath>,
    query: actix_web::web::Query<PointsQuery>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = touch(&mut g, &path.id) else {
        return not_found();
    };
    let tables: Vec<GroupTable> = t
        .standings_with(&query.points())
        .into_iter()
        .map(|(group, rows)| GroupTable {
            group_name: t.group_name(&group),
            group,
            rows,
        })
        .collect();
    HttpResponse::Ok().json(tables)
}

/// Current standings as CSV.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(
    state: AppState,
    path: Path<TournamentPath>,
    query: actix_web::web::Query<PointsQuery>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = touch(&mut g, &path.id) else {
        return not_found();
    };
    let standings = t.standings_with(&query.points());
    let mut out = Vec::new();
    match write_standings_csv(&mut out, &standings, |key| t.group_name(key)) {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(out),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_inactivity_hours() -> u64 {
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
    let inactivity_hours: u64 = std::env::var("INACTIVITY_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_inactivity_hours);
    let inactivity_timeout = Duration::from_secs(inactivity_hours * 3600);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state: AppState = Data::new(RwLock::new(Tournaments::new()));

    // Background task: every 30 minutes, remove tournaments idle for longer than the timeout
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
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive tournament(s) (no activity for {}h)",
                    removed,
                    inactivity_hours
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_import_roster)
            .service(api_add_group)
            .service(api_assign_group)
            .service(api_generate_fixtures)
            .service(api_reset_fixtures)
            .service(api_record_result)
            .service(api_set_match_status)
            .service(api_standings)
            .service(api_standings_csv)
    })
    .bind(bind)?
    .run()
    .await
}
