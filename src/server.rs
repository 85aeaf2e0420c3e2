//! JSON endpoints for the dashboard front end.
//!
//! Every view endpoint reads the selection from the query string, so each
//! request is computed on its own from the shared, read-only dataset.

use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    data::{
        dataset::Dataset,
        field::Field,
        selection::{Selection, AGE_LOWER_BOUND, AGE_UPPER_BOUND},
    },
    error::ExplorerError,
    pipeline::{aggregate, filter},
    presentation::{
        dashboard, distribution_spec, group_comparison_spec, group_stats_table, row_table,
        summary_text,
    },
};

const DEFAULT_PAGE_SIZE: usize = 10;

pub struct AppState {
    pub dataset: Dataset,
    pub default_selection: Selection,
}

impl AppState {
    pub fn new(dataset: Dataset, default_selection: Selection) -> Self {
        Self {
            dataset,
            default_selection,
        }
    }
}

impl ResponseError for ExplorerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ExplorerError::InvalidFieldKind { .. }
            | ExplorerError::InvalidAgeBounds { .. }
            | ExplorerError::ParseFieldError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Selection parameters; anything omitted falls back to the configured default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SelectionQuery {
    pub measurement: Option<Field>,
    pub group: Option<Field>,
    pub exclude_missing: Option<bool>,
    pub age_min: Option<f64>,
    pub age_max: Option<f64>,
}

impl SelectionQuery {
    pub fn resolve(&self, defaults: &Selection) -> Result<Selection, ExplorerError> {
        let selection = Selection {
            measurement: self.measurement.unwrap_or(defaults.measurement),
            group: self.group.unwrap_or(defaults.group),
            exclude_missing: self.exclude_missing.unwrap_or(defaults.exclude_missing),
            age_min: self.age_min.unwrap_or(defaults.age_min),
            age_max: self.age_max.unwrap_or(defaults.age_max),
        };
        if let Err(e) = selection.validate() {
            warn!("Rejected selection {:?}: {}", selection, e);
            return Err(e);
        }
        debug!(?selection, "Resolved selection");
        Ok(selection)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TableQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
struct FieldOptions {
    measurements: Vec<Field>,
    groups: Vec<Field>,
    age_bounds: (f64, f64),
}

#[derive(Debug, Serialize)]
struct SummaryResponse {
    selection: Selection,
    summary: String,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

async fn get_fields() -> impl Responder {
    HttpResponse::Ok().json(FieldOptions {
        measurements: Field::MEASUREMENTS.to_vec(),
        groups: Field::GROUPS.to_vec(),
        age_bounds: (AGE_LOWER_BOUND, AGE_UPPER_BOUND),
    })
}

async fn get_default_selection(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(&state.default_selection)
}

async fn get_summary(
    query: web::Query<SelectionQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ExplorerError> {
    let selection = query.resolve(&state.default_selection)?;
    let view = filter(&state.dataset, &selection);
    let summary = summary_text(&view, selection.measurement);
    Ok(HttpResponse::Ok().json(SummaryResponse { selection, summary }))
}

async fn get_group_stats(
    query: web::Query<SelectionQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ExplorerError> {
    let selection = query.resolve(&state.default_selection)?;
    let view = filter(&state.dataset, &selection);
    let summaries = aggregate(&view, selection.measurement, selection.group)?;
    Ok(HttpResponse::Ok().json(group_stats_table(summaries).rounded()))
}

async fn get_distribution(
    query: web::Query<SelectionQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ExplorerError> {
    let selection = query.resolve(&state.default_selection)?;
    let view = filter(&state.dataset, &selection);
    Ok(HttpResponse::Ok().json(distribution_spec(&view, selection.measurement)))
}

async fn get_comparison(
    query: web::Query<SelectionQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ExplorerError> {
    let selection = query.resolve(&state.default_selection)?;
    let view = filter(&state.dataset, &selection);
    Ok(HttpResponse::Ok().json(group_comparison_spec(
        &view,
        selection.measurement,
        selection.group,
    )))
}

async fn get_rows(
    query: web::Query<SelectionQuery>,
    table_query: web::Query<TableQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ExplorerError> {
    let selection = query.resolve(&state.default_selection)?;
    let view = filter(&state.dataset, &selection);
    let mut table = row_table(&view, selection.measurement, selection.group);
    if let Some(search) = table_query.search.as_deref() {
        table = table.search(search);
    }
    let page = table.page(
        table_query.page.unwrap_or(0),
        table_query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    Ok(HttpResponse::Ok().json(page))
}

async fn get_dashboard(
    query: web::Query<SelectionQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ExplorerError> {
    let selection = query.resolve(&state.default_selection)?;
    let mut result = dashboard(&state.dataset, &selection)?;
    result.group_stats = result.group_stats.rounded();
    Ok(HttpResponse::Ok().json(result))
}

/// Mounts every route. The caller registers `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/fields", web::get().to(get_fields))
        .route("/selection/default", web::get().to(get_default_selection))
        .route("/summary", web::get().to(get_summary))
        .route("/group-stats", web::get().to(get_group_stats))
        .route("/distribution", web::get().to(get_distribution))
        .route("/comparison", web::get().to(get_comparison))
        .route("/rows", web::get().to(get_rows))
        .route("/dashboard", web::get().to(get_dashboard));
}
