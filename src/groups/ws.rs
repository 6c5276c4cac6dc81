use axum::{
    debug_handler,
    extract::{ws::Message, Path, State, WebSocketUpgrade},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::{groups::msg::GroupMessage, AppError, AppResult};

/// `GET /api/groups/{group_id}/ws` — stream of messages inserted into the
/// group while the socket is open. Events carry the full record including
/// `senderId`, which clients compare against their own identity to suppress
/// the echo of an optimistically rendered send.
///
/// Delivery is at-least-once and order-undefined across concurrent senders;
/// a subscriber that lags far enough to drop events just keeps going from
/// the next one.
#[debug_handler(state = crate::AppState)]
pub async fn group_ws(
    Path(group_id): Path<Uuid>,
    State(db_pool): State<SqlitePool>,
    State(tx): State<broadcast::Sender<GroupMessage>>,

    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    if sqlx::query_as::<_, (String,)>("SELECT id FROM interest_groups WHERE id=?")
        .bind(group_id.to_string())
        .fetch_optional(&db_pool)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Group not found".to_owned()));
    }

    Ok(ws.on_upgrade(async move |stream| {
        let mut rx = tx.subscribe();
        let (mut sender, mut receiver) = stream.split();

        let mut forward_task = tokio::spawn(async move {
            loop {
                let event = match rx.recv().await {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "live update subscriber lagged");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                if event.group_id != group_id {
                    continue;
                }
                let Ok(payload) = serde_json::to_string(&event) else {
                    continue;
                };
                if sender.send(Message::Text(payload.into())).await.is_err() {
                    break;
                }
            }
        });

        // The stream is outbound-only; drain the client side so any close
        // frame or error ends the subscription.
        while let Some(Ok(_)) = receiver.next().await {}

        forward_task.abort();
        let _ = (&mut forward_task).await;
    }))
}
