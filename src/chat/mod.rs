mod prompts;

use axum::{debug_handler, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{
    ai::{AiClients, ChatMessage, GeminiTurn},
    AppError, AppResult, AppState,
};

/// Turns of history to keep as context on every endpoint.
const HISTORY_WINDOW: usize = 10;
const MAX_TOKENS: u32 = 1000;

/// Welcome placeholders the UI injects; they are filtered out of the
/// history before the window is applied so they never count as turns.
const NAVIGATOR_WELCOMES: [&str; 2] = [
    "Halo! Saya AI Campus Navigator. Ada yang bisa saya bantu tentang kampus?",
    "Halo! Saya AI Campus Navigator UNS. Saya siap membantu menjawab pertanyaan seputar kampus. Silakan pilih pertanyaan cepat di bawah atau ketik pertanyaan Anda sendiri!",
];
const CAMPUS_WELCOME: &str = "Halo! Saya AI Campus Navigator";
const GENERAL_WELCOME: &str = "Halo! Saya asisten AI yang siap membantu";
const AICAMPUS_WELCOME: &str = "Halo! Saya AI Assistant untuk aplikasi web AICAMPUS";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(navigator))
        .route("/campus", post(campus))
        .route("/general", post(general))
        .route("/aicampus", post(aicampus))
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    history: Vec<ChatMessage>,
    university: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    response: String,
}

/// Drops welcome placeholders, keeps the last [`HISTORY_WINDOW`] turns, and
/// normalizes every non-user role to the provider's assistant role.
fn windowed_history(history: Vec<ChatMessage>, welcome_marker: &str) -> Vec<ChatMessage> {
    let mut kept: Vec<ChatMessage> = history
        .into_iter()
        .filter(|msg| !msg.content.contains(welcome_marker))
        .map(|msg| ChatMessage {
            role: if msg.role == "user" { "user".to_owned() } else { "assistant".to_owned() },
            content: msg.content,
        })
        .collect();
    if kept.len() > HISTORY_WINDOW {
        kept.drain(..kept.len() - HISTORY_WINDOW);
    }
    kept
}

/// Gemini variant of the window: exact-match welcome filtering, user/model
/// roles, and no leading model turn (the API requires the first turn to be
/// the user's).
fn gemini_history(history: Vec<ChatMessage>) -> Vec<GeminiTurn> {
    let mut kept: Vec<&ChatMessage> = history
        .iter()
        .filter(|msg| !NAVIGATOR_WELCOMES.contains(&msg.content.as_str()))
        .collect();
    if kept.len() > HISTORY_WINDOW {
        kept.drain(..kept.len() - HISTORY_WINDOW);
    }

    let mut turns: Vec<GeminiTurn> = kept
        .into_iter()
        .map(|msg| {
            let role = if msg.role == "user" { "user" } else { "model" };
            GeminiTurn::new(role, &msg.content)
        })
        .collect();
    if turns.first().is_some_and(|t| t.role == "model") {
        turns.remove(0);
    }
    turns
}

fn require_message(request: &ChatRequest) -> AppResult<()> {
    if request.message.is_empty() {
        return Err(AppError::BadRequest("Message is required".to_owned()));
    }
    Ok(())
}

async fn complete(
    ai: &AiClients,
    system_prompt: String,
    request: ChatRequest,
    welcome_marker: &str,
) -> AppResult<Json<ChatResponse>> {
    require_message(&request)?;
    let groq = ai.groq()?;

    let mut messages = vec![ChatMessage { role: "system".to_owned(), content: system_prompt }];
    messages.extend(windowed_history(request.history, welcome_marker));
    messages.push(ChatMessage { role: "user".to_owned(), content: request.message });

    let response = groq.chat(&messages, MAX_TOKENS).await?;
    Ok(Json(ChatResponse { response }))
}

/// `POST /api/chat` — campus navigator on the conversational provider.
#[debug_handler(state = AppState)]
async fn navigator(
    State(ai): State<AiClients>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    require_message(&request)?;
    let gemini = ai.gemini()?;

    let mut turns = gemini_history(request.history);
    turns.push(GeminiTurn::new("user", &request.message));

    let response = gemini
        .generate(Some(&prompts::navigator()), turns, MAX_TOKENS)
        .await?;
    Ok(Json(ChatResponse { response }))
}

/// `POST /api/chat/campus` — institution name comes from the request.
#[debug_handler(state = AppState)]
async fn campus(
    State(ai): State<AiClients>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let prompt = prompts::campus(request.university.as_deref());
    complete(&ai, prompt, request, CAMPUS_WELCOME).await
}

/// `POST /api/chat/general`
#[debug_handler(state = AppState)]
async fn general(
    State(ai): State<AiClients>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    complete(&ai, prompts::GENERAL.to_owned(), request, GENERAL_WELCOME).await
}

/// `POST /api/chat/aicampus` — product FAQ mode.
#[debug_handler(state = AppState)]
async fn aicampus(
    State(ai): State<AiClients>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    complete(&ai, prompts::AICAMPUS.to_owned(), request, AICAMPUS_WELCOME).await
}
