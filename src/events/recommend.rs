//! Pure half of the recommendation flow: prompt assembly, response decoding,
//! and the deterministic fallback. Kept free of I/O so it is testable
//! without a provider.

use serde::{Deserialize, Serialize};

use super::catalog::Event;
use crate::AppResult;

/// Ranked list shape the model is instructed to emit.
#[derive(Debug, Deserialize)]
pub struct AiRecommendations {
    pub recommendations: Vec<AiRecommendation>,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    pub event_id: u32,
    pub relevance_score: i64,
    pub reason: String,
}

/// Catalog entry annotated with the model's score and justification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub relevance_score: i64,
    pub recommendation_reason: String,
}

pub fn build_prompt(interests: &[String], events: &[Event]) -> AppResult<String> {
    let catalog_json = serde_json::to_string_pretty(events)?;
    Ok(format!(
        "Kamu adalah AI Event Recommender untuk kampus UNS.

User memiliki minat di: {}

Berikut adalah daftar event yang tersedia:
{catalog_json}

Tugasmu:
1. Analisis minat user dan cocokkan dengan event yang tersedia
2. Rekomendasikan 5-7 event yang PALING SESUAI dengan minat user
3. Urutkan dari yang paling relevan ke yang kurang relevan
4. Berikan penjelasan singkat (1-2 kalimat) kenapa event ini cocok untuk user

Format response dalam JSON:
{{
  \"recommendations\": [
    {{
      \"eventId\": number,
      \"relevanceScore\": number (1-100),
      \"reason\": \"string (kenapa event ini cocok)\"
    }}
  ],
  \"summary\": \"string (ringkasan rekomendasi dalam 2-3 kalimat)\"
}}

PENTING: Response harus dalam format JSON yang valid!",
        interests.join(", ")
    ))
}

/// Models routinely wrap JSON answers in a markdown code fence; strip any
/// fencing before handing the text to the decoder.
pub fn strip_code_fence(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_owned()
}

/// Decodes the model's answer. A `None` means the text was not the expected
/// shape and the caller must take the fallback branch; it is not an error.
pub fn parse_recommendations(text: &str) -> Option<AiRecommendations> {
    serde_json::from_str(&strip_code_fence(text)).ok()
}

/// Joins the model's ranking back onto the catalog. Ids the catalog does not
/// contain are dropped and scores are pinned into 1..=100.
pub fn resolve_recommendations(
    events: &[Event],
    ai: AiRecommendations,
) -> (Vec<RecommendedEvent>, String) {
    let resolved = ai
        .recommendations
        .into_iter()
        .filter_map(|rec| {
            let event = events.iter().find(|e| e.id == rec.event_id)?.clone();
            Some(RecommendedEvent {
                event,
                relevance_score: rec.relevance_score.clamp(1, 100),
                recommendation_reason: rec.reason,
            })
        })
        .collect();
    (resolved, ai.summary)
}

/// Deterministic fallback: events whose tag set overlaps the requested
/// interests by case-insensitive substring in either direction, capped at 5.
pub fn fallback_filter(events: &[Event], interests: &[String]) -> Vec<Event> {
    events
        .iter()
        .filter(|event| {
            event.tags.iter().any(|tag| {
                let tag = tag.to_lowercase();
                interests.iter().any(|interest| {
                    let interest = interest.to_lowercase();
                    tag.contains(&interest) || interest.contains(&tag)
                })
            })
        })
        .take(5)
        .cloned()
        .collect()
}

pub fn fallback_summary(count: usize) -> String {
    format!("Menemukan {count} event yang sesuai dengan minat Anda.")
}
