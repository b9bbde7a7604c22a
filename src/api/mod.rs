use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};

use crate::dashboard::{DashboardRequest, DashboardView};
use crate::web::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/weather", get(get_weather))
}

/// Same inputs as the HTML page, answered as JSON
async fn get_weather(
    State(state): State<AppState>,
    Query(request): Query<DashboardRequest>,
) -> Json<DashboardView> {
    Json(state.dashboard.handle(&request).await)
}
