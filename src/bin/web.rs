//! Single binary web server for knockout tournaments: roster, tables, bracket and status via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env (or `.env`): HOST, PORT,
//! DATABASE_PATH (default database.json), BYE_POLICY (balanced | greedy).

use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use knockout_tournament::{
    advance_latest, latest_status, record_latest_result, start_tournament, ByePolicy, Progress,
    ServerConfig, Store, StoreError,
};
use serde::Deserialize;

/// Shared state: the store serializes every load-mutate-save cycle.
struct AppContext {
    store: Store,
    bye_policy: ByePolicy,
}

type AppState = Data<AppContext>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct AddTablesBody {
    count: usize,
}

#[derive(Deserialize)]
struct MatchWinnerBody {
    winner: String,
}

/// Path segment: match id (e.g. /api/tournament/matches/{match_id}/winner)
#[derive(Deserialize)]
struct MatchPath {
    match_id: String,
}

#[derive(Deserialize)]
struct PlayerPath {
    name: String,
}

#[derive(Deserialize)]
struct TablesPath {
    count: usize,
}

/// Rejected commands are the caller's fault (400); anything else is ours (500).
fn error_response(e: StoreError) -> HttpResponse {
    if e.is_rejection() {
        HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
    } else {
        log::error!("Store failure: {}", e);
        HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
    }
}

/// Run a store call on the blocking pool so file I/O never stalls a worker thread.
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, StoreError>
where
    F: FnOnce(&AppContext) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let ctx = state.clone();
    web::block(move || f(&ctx))
        .await
        .map_err(|e| StoreError::Io(std::io::Error::other(e.to_string())))?
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "knockout-tournament",
    })
}

/// Latest tournament as JSON (404 if none has been started).
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    match with_store(&state, |ctx| ctx.store.snapshot()).await {
        Ok(db) => match db.latest_tournament() {
            Some(t) => HttpResponse::Ok().json(t),
            None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
        },
        Err(e) => error_response(e),
    }
}

/// Plain-text summary of the latest tournament.
#[get("/api/tournament/status")]
async fn api_tournament_status(state: AppState) -> HttpResponse {
    match with_store(&state, |ctx| ctx.store.snapshot()).await {
        Ok(db) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(latest_status(&db)),
        Err(e) => error_response(e),
    }
}

/// Start a tournament: shuffle the roster and build round 0 over all tables.
#[post("/api/tournament/start")]
async fn api_start_tournament(state: AppState) -> HttpResponse {
    let result = with_store(&state, |ctx| {
        ctx.store.transact(|db| {
            start_tournament(db, ctx.bye_policy, &mut rand::thread_rng()).cloned()
        })
    })
    .await;
    match result {
        Ok(t) => {
            log::info!(
                "Started tournament {} with {} players over {} table(s)",
                t.id,
                t.players.len(),
                t.tables.len()
            );
            HttpResponse::Ok().json(t)
        }
        Err(e) => error_response(e),
    }
}

/// Record a match winner on the latest tournament.
#[put("/api/tournament/matches/{match_id}/winner")]
async fn api_set_match_winner(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<MatchWinnerBody>,
) -> HttpResponse {
    let match_id = path.into_inner().match_id;
    let winner = body.into_inner().winner;
    let result = with_store(&state, move |ctx| {
        ctx.store.transact(|db| {
            let progress = record_latest_result(db, &match_id, &winner)?;
            Ok::<_, StoreError>((progress, db.latest_tournament().cloned()))
        })
    })
    .await;
    match result {
        Ok((progress, Some(t))) => {
            log_progress(&t.id, progress);
            HttpResponse::Ok().json(t)
        }
        Ok((_, None)) => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
        Err(e) => error_response(e),
    }
}

/// Explicitly close the current round (fails while matches are open).
#[post("/api/tournament/advance")]
async fn api_advance_round(state: AppState) -> HttpResponse {
    let result = with_store(&state, |ctx| {
        ctx.store.transact(|db| {
            let progress = advance_latest(db)?;
            Ok::<_, StoreError>((progress, db.latest_tournament().cloned()))
        })
    })
    .await;
    match result {
        Ok((progress, Some(t))) => {
            log_progress(&t.id, progress);
            HttpResponse::Ok().json(t)
        }
        Ok((_, None)) => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
        Err(e) => error_response(e),
    }
}

/// Remove every tournament; roster and tables stay.
#[delete("/api/tournament")]
async fn api_clear_tournaments(state: AppState) -> HttpResponse {
    let result = with_store(&state, |ctx| {
        ctx.store
            .transact(|db| Ok::<_, StoreError>(db.clear_tournaments()))
    })
    .await;
    match result {
        Ok(removed) => {
            log::info!("Cleared {} tournament(s)", removed);
            HttpResponse::Ok().json(serde_json::json!({ "removed": removed }))
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    match with_store(&state, |ctx| ctx.store.snapshot()).await {
        Ok(db) => HttpResponse::Ok().json(&db.players),
        Err(e) => error_response(e),
    }
}

#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let name = body.into_inner().name;
    let result = with_store(&state, move |ctx| {
        ctx.store.transact(|db| db.add_player(&name).cloned())
    })
    .await;
    match result {
        Ok(p) => HttpResponse::Ok().json(p),
        Err(e) => error_response(e),
    }
}

#[delete("/api/players/{name}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let name = path.into_inner().name;
    let result = with_store(&state, move |ctx| {
        ctx.store.transact(|db| db.remove_player(&name))
    })
    .await;
    match result {
        Ok(p) => HttpResponse::Ok().json(p),
        Err(e) => error_response(e),
    }
}

/// Import players from a CSV body (one name per row, optional `name` header).
#[post("/api/players/import")]
async fn api_import_players(state: AppState, body: String) -> HttpResponse {
    let result = with_store(&state, move |ctx| {
        ctx.store.transact(|db| db.import_players_csv(body.as_bytes()))
    })
    .await;
    match result {
        Ok(added) => {
            log::info!("Imported {} player(s) from CSV", added);
            HttpResponse::Ok().json(serde_json::json!({ "added": added }))
        }
        Err(e) => error_response(e),
    }
}

#[get("/api/tables")]
async fn api_list_tables(state: AppState) -> HttpResponse {
    match with_store(&state, |ctx| ctx.store.snapshot()).await {
        Ok(db) => HttpResponse::Ok().json(&db.tables),
        Err(e) => error_response(e),
    }
}

#[post("/api/tables")]
async fn api_add_tables(state: AppState, body: Json<AddTablesBody>) -> HttpResponse {
    let count = body.count;
    let result = with_store(&state, move |ctx| {
        ctx.store
            .transact(|db| Ok::<_, StoreError>(db.add_tables(count).to_vec()))
    })
    .await;
    match result {
        Ok(added) => HttpResponse::Ok().json(added),
        Err(e) => error_response(e),
    }
}

/// Remove the `count` most recently added tables.
#[delete("/api/tables/{count}")]
async fn api_remove_tables(state: AppState, path: Path<TablesPath>) -> HttpResponse {
    let count = path.count;
    let result = with_store(&state, move |ctx| ctx.store.transact(|db| db.remove_tables(count))).await;
    match result {
        Ok(removed) => HttpResponse::Ok().json(removed),
        Err(e) => error_response(e),
    }
}

fn log_progress(tournament_id: &str, progress: Progress) {
    match progress {
        Progress::Waiting => {}
        Progress::Advanced(round) => {
            log::info!("Tournament {} advanced to round {}", tournament_id, round + 1)
        }
        Progress::Completed => log::info!("Tournament {} complete", tournament_id),
    }
}

fn routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_get_tournament)
        .service(api_tournament_status)
        .service(api_start_tournament)
        .service(api_set_match_winner)
        .service(api_advance_round)
        .service(api_clear_tournaments)
        .service(api_list_players)
        .service(api_import_players)
        .service(api_add_player)
        .service(api_remove_player)
        .service(api_list_tables)
        .service(api_add_tables)
        .service(api_remove_tables);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    log::info!(
        "Starting server at http://{}:{} (database: {}, bye policy: {:?})",
        config.host,
        config.port,
        config.database_path.display(),
        config.bye_policy
    );

    let state = Data::new(AppContext {
        store: Store::new(config.database_path.clone()),
        bye_policy: config.bye_policy,
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
