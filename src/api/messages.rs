use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::api::request_claims;
use crate::{database::MongoDB, services::messaging_service};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct StartConversationRequest {
    pub other_user_id: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/messages/conversations",
    tag = "Messages",
    responses(
        (status = 200, description = "Inbox listing, most recently active first")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_conversations(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!("💬 GET /messages/conversations - {}", claims.sub);

    match messaging_service::get_user_conversations(&db, &claims.sub).await {
        Ok(conversations) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "count": conversations.len(),
            "conversations": conversations
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch conversations: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/messages/conversations",
    tag = "Messages",
    request_body = StartConversationRequest,
    responses(
        (status = 200, description = "Conversation found or created")
    ),
    security(("bearer_auth" = []))
)]
pub async fn start_conversation(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    body: web::Json<StartConversationRequest>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    log::info!(
        "💬 POST /messages/conversations - {} ↔ {}",
        claims.sub,
        body.other_user_id
    );

    if body.other_user_id == claims.sub {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Cannot start a conversation with yourself"
        }));
    }

    match messaging_service::get_or_create_conversation(&db, &claims.sub, &body.other_user_id).await
    {
        Ok(conversation) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "conversation": conversation
        })),
        Err(e) => {
            log::error!("❌ Failed to start conversation: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn get_messages(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<MessagesQuery>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    let conversation_id = path.into_inner();
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    log::info!("💬 GET /messages/{}/messages - {}", conversation_id, claims.sub);

    match messaging_service::is_participant(&db, &conversation_id, &claims.sub).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Forbidden().json(serde_json::json!({
                "success": false,
                "error": "Not a participant of this conversation"
            }));
        }
        Err(e) => {
            log::error!("❌ Failed to check conversation membership: {}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }));
        }
    }

    match messaging_service::get_messages(&db, &conversation_id, limit).await {
        Ok(messages) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "count": messages.len(),
            "messages": messages
        })),
        Err(e) => {
            log::error!("❌ Failed to fetch messages: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/messages/{conversation_id}/messages",
    tag = "Messages",
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent"),
        (status = 400, description = "Empty content or unknown conversation")
    ),
    security(("bearer_auth" = []))
)]
pub async fn send_message(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<SendMessageRequest>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    let conversation_id = path.into_inner();
    log::info!("📨 POST /messages/{}/messages - {}", conversation_id, claims.sub);

    match messaging_service::send_message(&db, &conversation_id, &claims.sub, &body.content).await
    {
        Ok(message) => HttpResponse::Created().json(serde_json::json!({
            "success": true,
            "message": message
        })),
        Err(e) => {
            log::warn!("❌ Failed to send message: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn mark_read(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };
    let conversation_id = path.into_inner();
    log::info!("👁️ POST /messages/{}/read - {}", conversation_id, claims.sub);

    match messaging_service::mark_conversation_read(&db, &conversation_id, &claims.sub).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "success": true
        })),
        Err(e) => {
            log::error!("❌ Failed to mark conversation read: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn unread_count(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    let claims = match request_claims(&req) {
        Some(c) => c,
        None => return HttpResponse::Unauthorized().finish(),
    };

    match messaging_service::get_total_unread(&db, &claims.sub).await {
        Ok(total) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "unread": total
        })),
        Err(e) => {
            log::error!("❌ Failed to count unread messages: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
