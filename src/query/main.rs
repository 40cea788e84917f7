//! Query server for address lookups and name search.
//!
//! Loads the reference dataset once at startup and serves hierarchy browsing, search,
//! address formatting, postal resolution and validation over HTTP/JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bd_address::{
    load_dataset, AddressDb, AdminKind, Config, District, Division, FuzzyHit, NotFoundError,
    PostalCode, SearchHit, SearchResults, Union, Upazila,
};

mod api;
use api::{
    AddressQueryParams, AddressResponse, AutocompleteQueryParams, HealthResponse,
    PostalCodeResponse, SearchQueryParams, StatsResponse, TextQueryParams,
    UpazilaPostalResponse, ValidateQueryParams, ValidateResponse,
};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Bangladesh address lookup and search server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset directory or combined JSON file (overrides config)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,
}

/// Application state shared across handlers
struct AppState {
    db: AddressDb,
    max_autocomplete: usize,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(dataset) = args.dataset {
        config.dataset.path = dataset;
    }
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }

    info!("bd-address Query Server");
    info!("Loading dataset from {}", config.dataset.path.display());

    let raw = load_dataset(&config.dataset.path)?;
    let db = AddressDb::build(&raw, config.search.clone()).context("Invalid dataset")?;

    let stats = db.stats();
    info!(
        "Serving {} divisions, {} districts, {} upazilas, {} unions",
        stats.total_divisions, stats.total_districts, stats.total_upazilas, stats.total_unions
    );

    let state = Arc::new(AppState {
        db,
        max_autocomplete: config.server.max_autocomplete,
    });

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/stats", get(stats_handler))
        .route("/v1/divisions", get(divisions_handler))
        .route("/v1/divisions/{id}/districts", get(districts_handler))
        .route("/v1/districts/{id}/upazilas", get(upazilas_handler))
        .route("/v1/upazilas/{id}/unions", get(unions_handler))
        .route("/v1/search", get(search_handler))
        .route("/v1/quick", get(quick_handler))
        .route("/v1/autocomplete", get(autocomplete_handler))
        .route("/v1/fuzzy", get(fuzzy_handler))
        .route("/v1/address/upazila/{id}", get(upazila_address_handler))
        .route("/v1/address/union/{id}", get(union_address_handler))
        .route("/v1/postal/upazila/{id}", get(upazila_postal_handler))
        .route("/v1/postal/code/{code}", get(postal_code_handler))
        .route("/v1/validate", get(validate_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn not_found(err: NotFoundError) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, err.to_string())
}

fn bad_request(message: String) -> (StatusCode, String) {
    debug!("Rejected request: {}", message);
    (StatusCode::BAD_REQUEST, message)
}

/// 404 unless `kind`/`id` exists.
fn require(state: &AppState, kind: AdminKind, id: u32) -> Result<(), (StatusCode, String)> {
    if state.db.get(kind, id).is_some() {
        Ok(())
    } else {
        Err(not_found(NotFoundError { kind, id }))
    }
}

/// Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        divisions: state.db.stats().total_divisions,
    })
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        totals: *state.db.stats(),
        divisions: state.db.division_breakdown(),
    })
}

async fn divisions_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Division>> {
    Json(state.db.divisions().to_vec())
}

async fn districts_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<Vec<District>> {
    require(&state, AdminKind::Division, id)?;
    Ok(Json(
        state.db.districts_of_division(id).into_iter().cloned().collect(),
    ))
}

async fn upazilas_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<Vec<Upazila>> {
    require(&state, AdminKind::District, id)?;
    Ok(Json(
        state.db.upazilas_of_district(id).into_iter().cloned().collect(),
    ))
}

async fn unions_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<Vec<Union>> {
    require(&state, AdminKind::Upazila, id)?;
    Ok(Json(
        state.db.unions_of_upazila(id).into_iter().cloned().collect(),
    ))
}

/// Substring search, grouped by kind
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQueryParams>,
) -> ApiResult<SearchResults> {
    let options = params.options().map_err(bad_request)?;
    Ok(Json(state.db.search_with(&params.text, &options)))
}

async fn quick_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TextQueryParams>,
) -> Json<Option<SearchHit>> {
    Json(state.db.quick_search(&params.text))
}

/// Prefix suggestions, capped at the configured maximum size
async fn autocomplete_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AutocompleteQueryParams>,
) -> Json<Vec<SearchHit>> {
    let size = params.size.map(|size| size.min(state.max_autocomplete));
    Json(state.db.autocomplete(&params.text, size))
}

async fn fuzzy_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TextQueryParams>,
) -> Json<Vec<FuzzyHit>> {
    Json(state.db.fuzzy_search(&params.text))
}

async fn upazila_address_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Query(params): Query<AddressQueryParams>,
) -> ApiResult<AddressResponse> {
    let options = params.options().map_err(bad_request)?;
    let address = state.db.full_address(id).map_err(not_found)?;
    let postal = state.db.resolve_postal(AdminKind::Upazila, id);
    Ok(Json(AddressResponse::new(&address, &options, postal)))
}

async fn union_address_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Query(params): Query<AddressQueryParams>,
) -> ApiResult<AddressResponse> {
    let options = params.options().map_err(bad_request)?;
    let address = state.db.full_address_of_union(id).map_err(not_found)?;
    let postal = state.db.resolve_postal(AdminKind::Union, id);
    Ok(Json(AddressResponse::new(&address, &options, postal)))
}

async fn upazila_postal_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> ApiResult<UpazilaPostalResponse> {
    let info = state.db.postal_info(id).ok_or_else(|| {
        not_found(NotFoundError {
            kind: AdminKind::Upazila,
            id,
        })
    })?;
    Ok(Json(UpazilaPostalResponse {
        upazila_id: id,
        info,
        resolution: info.resolution(),
    }))
}

/// Reverse postal lookup: upazilas with the code and districts whose range covers it
async fn postal_code_handler(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<PostalCodeResponse> {
    let code: PostalCode = code.parse().map_err(bad_request)?;
    Ok(Json(PostalCodeResponse {
        code,
        upazilas: state
            .db
            .upazilas_with_postal_code(code)
            .into_iter()
            .cloned()
            .collect(),
        districts: state
            .db
            .districts_covering(code)
            .into_iter()
            .cloned()
            .collect(),
    }))
}

async fn validate_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ValidateQueryParams>,
) -> ApiResult<ValidateResponse> {
    let (kind, ancestor) = params.parse().map_err(bad_request)?;
    Ok(Json(ValidateResponse {
        kind,
        id: params.id,
        valid: state.db.is_valid(kind, params.id),
        descendant: ancestor.map(|(ancestor_kind, ancestor_id)| {
            state
                .db
                .is_descendant_of(kind, params.id, ancestor_kind, ancestor_id)
        }),
    }))
}
