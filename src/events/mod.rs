pub mod catalog;
pub mod recommend;

use axum::{debug_handler, extract::State, response::{IntoResponse, Response}, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{ai::AiClients, AppError, AppResult, AppState};

use self::catalog::{catalog, Event};
use self::recommend::RecommendedEvent;

const RECOMMEND_MAX_TOKENS: u32 = 2000;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_events).post(recommend_events))
}

#[derive(Serialize)]
struct EventList {
    events: Vec<Event>,
    total: usize,
}

/// `GET /api/events` — static catalog dump.
#[debug_handler]
async fn list_events() -> Json<EventList> {
    let events = catalog();
    let total = events.len();
    Json(EventList { events, total })
}

#[derive(Deserialize)]
struct RecommendRequest {
    #[serde(default)]
    interests: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Recommendations {
    recommendations: Vec<RecommendedEvent>,
    summary: String,
    total_events: usize,
    matched_events: usize,
}

/// `POST /api/events` — AI-ranked recommendations for the submitted
/// interests, with a deterministic keyword fallback when the model's answer
/// does not decode.
#[debug_handler(state = AppState)]
async fn recommend_events(
    State(ai): State<AiClients>,
    Json(RecommendRequest { interests }): Json<RecommendRequest>,
) -> AppResult<Response> {
    if interests.is_empty() {
        return Err(AppError::BadRequest("Interests array is required".to_owned()));
    }
    let gemini = ai.gemini()?;

    let events = catalog();
    if events.is_empty() {
        return Err(AppError::NotFound("No events available at the moment".to_owned()));
    }

    let prompt = recommend::build_prompt(&interests, &events)?;
    let text = gemini.generate_text(&prompt, RECOMMEND_MAX_TOKENS).await?;

    let Some(ai_result) = recommend::parse_recommendations(&text) else {
        tracing::warn!("recommendation response was not valid JSON, using keyword fallback");
        let matched = recommend::fallback_filter(&events, &interests);
        let summary = recommend::fallback_summary(matched.len());
        return Ok(Json(json!({
            "recommendations": matched,
            "summary": summary,
        }))
        .into_response());
    };

    let (recommendations, summary) = recommend::resolve_recommendations(&events, ai_result);
    Ok(Json(Recommendations {
        matched_events: recommendations.len(),
        total_events: events.len(),
        recommendations,
        summary,
    })
    .into_response())
}
