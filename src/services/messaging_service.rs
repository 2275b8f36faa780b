use std::collections::HashMap;

use crate::{
    database::MongoDB,
    models::{Conversation, ConversationWithProfile, DatingProfile, LastMessage, Message},
    services::profile_service,
};
use chrono::Utc;
use futures::stream::StreamExt;
use mongodb::bson::doc;
use uuid::Uuid;

const CONVERSATIONS: &str = "conversations";
const MESSAGES: &str = "messages";

/// Deterministic conversation id: sorted participant uids joined by '_',
/// so either side computes the same key.
pub fn conversation_id_for(user_a: &str, user_b: &str) -> String {
    let mut ids = [user_a, user_b];
    ids.sort();
    format!("{}_{}", ids[0], ids[1])
}

/// Finds the conversation between the two users, creating it if needed.
pub async fn get_or_create_conversation(
    db: &MongoDB,
    user_id: &str,
    other_user_id: &str,
) -> Result<Conversation, String> {
    let collection = db.collection::<Conversation>(CONVERSATIONS);
    let conversation_id = conversation_id_for(user_id, other_user_id);

    if let Some(existing) = collection
        .find_one(doc! { "conversation_id": &conversation_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?
    {
        return Ok(existing);
    }

    let my_profile = profile_service::get_profile(db, user_id).await?;
    let other_profile = profile_service::get_profile(db, other_user_id).await?;

    let mut participant_names = HashMap::new();
    let mut participant_photos = HashMap::new();
    for (uid, profile) in [(user_id, &my_profile), (other_user_id, &other_profile)] {
        if let Some(p) = profile {
            participant_names.insert(uid.to_string(), p.display_name.clone());
            if let Some(photo) = p.photos.first() {
                participant_photos.insert(uid.to_string(), photo.clone());
            }
        }
    }

    let now = Utc::now().timestamp_millis();
    let conversation = Conversation {
        _id: None,
        conversation_id: conversation_id.clone(),
        participants: vec![user_id.to_string(), other_user_id.to_string()],
        participant_names,
        participant_photos,
        last_message: None,
        unread_count: HashMap::from([
            (user_id.to_string(), 0),
            (other_user_id.to_string(), 0),
        ]),
        created_at: now,
        updated_at: now,
    };

    collection
        .insert_one(&conversation)
        .await
        .map_err(|e| format!("Failed to create conversation: {}", e))?;

    log::info!("✅ Conversation created: {}", conversation_id);
    Ok(conversation)
}

/// Inbox listing: the user's conversations, most recently updated first,
/// each enriched with the other participant's profile. Conversations whose
/// other participant no longer has a profile are skipped.
pub async fn get_user_conversations(
    db: &MongoDB,
    user_id: &str,
) -> Result<Vec<ConversationWithProfile>, String> {
    let collection = db.collection::<Conversation>(CONVERSATIONS);

    let mut cursor = collection
        .find(doc! { "participants": user_id })
        .sort(doc! { "updated_at": -1 })
        .await
        .map_err(|e| format!("Failed to fetch conversations: {}", e))?;

    let mut conversations = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(conversation) => conversations.push(conversation),
            Err(e) => log::error!("❌ Error reading conversation document: {}", e),
        }
    }

    let lookups = conversations.iter().map(|conversation| {
        let other_uid = conversation
            .participants
            .iter()
            .find(|p| p.as_str() != user_id)
            .cloned();
        async move {
            match other_uid {
                Some(uid) => profile_service::get_profile(db, &uid).await,
                None => Ok(None),
            }
        }
    });
    let profiles: Vec<Result<Option<DatingProfile>, String>> =
        futures::future::join_all(lookups).await;

    let mut enriched = Vec::new();
    for (conversation, profile) in conversations.into_iter().zip(profiles) {
        match profile {
            Ok(Some(other_user_profile)) => enriched.push(ConversationWithProfile {
                conversation,
                other_user_profile,
            }),
            Ok(None) => log::warn!(
                "⚠️  Skipping conversation {} (other participant has no profile)",
                conversation.conversation_id
            ),
            Err(e) => return Err(e),
        }
    }

    Ok(enriched)
}

/// Appends a message and updates the conversation's denormalized state:
/// last_message, the recipient's unread counter and updated_at.
pub async fn send_message(
    db: &MongoDB,
    conversation_id: &str,
    sender_id: &str,
    content: &str,
) -> Result<Message, String> {
    if content.trim().is_empty() {
        return Err("Message content cannot be empty".to_string());
    }

    let conversations = db.collection::<Conversation>(CONVERSATIONS);
    let conversation = conversations
        .find_one(doc! { "conversation_id": conversation_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("Conversation {} not found", conversation_id))?;

    if !conversation.participants.iter().any(|p| p == sender_id) {
        return Err("Sender is not a participant of this conversation".to_string());
    }

    let recipient_id = conversation
        .participants
        .iter()
        .find(|p| p.as_str() != sender_id)
        .cloned()
        .ok_or_else(|| "Conversation has no other participant".to_string())?;

    let sender_profile = profile_service::get_profile(db, sender_id).await?;
    let (sender_name, sender_photo) = match &sender_profile {
        Some(p) => (p.display_name.clone(), p.photos.first().cloned()),
        None => (sender_id.to_string(), None),
    };

    let now = Utc::now().timestamp_millis();
    let message = Message {
        _id: None,
        message_id: Uuid::new_v4().to_string(),
        conversation_id: conversation_id.to_string(),
        sender_id: sender_id.to_string(),
        sender_name,
        sender_photo,
        content: content.to_string(),
        timestamp: now,
        read: false,
    };

    db.collection::<Message>(MESSAGES)
        .insert_one(&message)
        .await
        .map_err(|e| format!("Failed to send message: {}", e))?;

    let last_message = LastMessage {
        content: content.to_string(),
        sender_id: sender_id.to_string(),
        timestamp: now,
    };
    conversations
        .update_one(
            doc! { "conversation_id": conversation_id },
            doc! {
                "$set": {
                    "last_message": mongodb::bson::to_bson(&last_message)
                        .map_err(|e| format!("Serialization error: {}", e))?,
                    "updated_at": now,
                },
                "$inc": { format!("unread_count.{}", recipient_id): 1i64 },
            },
        )
        .await
        .map_err(|e| format!("Failed to update conversation: {}", e))?;

    Ok(message)
}

/// True if `user_id` appears in the conversation's participant list.
/// Membership comes from the document, never from parsing the id — uids are
/// not guaranteed to be free of '_'.
pub async fn is_participant(
    db: &MongoDB,
    conversation_id: &str,
    user_id: &str,
) -> Result<bool, String> {
    let conversation = db
        .collection::<Conversation>(CONVERSATIONS)
        .find_one(doc! { "conversation_id": conversation_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(conversation
        .map(|c| c.participants.iter().any(|p| p == user_id))
        .unwrap_or(false))
}

/// Messages in chronological order, capped at `limit` most recent.
pub async fn get_messages(
    db: &MongoDB,
    conversation_id: &str,
    limit: i64,
) -> Result<Vec<Message>, String> {
    let collection = db.collection::<Message>(MESSAGES);

    let mut cursor = collection
        .find(doc! { "conversation_id": conversation_id })
        .sort(doc! { "timestamp": -1 })
        .limit(limit)
        .await
        .map_err(|e| format!("Failed to fetch messages: {}", e))?;

    let mut messages = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(message) => messages.push(message),
            Err(e) => log::error!("❌ Error reading message document: {}", e),
        }
    }

    // Fetched newest-first for the limit, returned oldest-first for display
    messages.reverse();
    Ok(messages)
}

/// Marks the conversation read for `user_id`: zeroes their unread counter
/// and flags the other side's messages as read.
pub async fn mark_conversation_read(
    db: &MongoDB,
    conversation_id: &str,
    user_id: &str,
) -> Result<(), String> {
    db.collection::<Conversation>(CONVERSATIONS)
        .update_one(
            doc! { "conversation_id": conversation_id },
            doc! { "$set": { format!("unread_count.{}", user_id): 0i64 } },
        )
        .await
        .map_err(|e| format!("Failed to reset unread count: {}", e))?;

    db.collection::<Message>(MESSAGES)
        .update_many(
            doc! {
                "conversation_id": conversation_id,
                "sender_id": { "$ne": user_id },
                "read": false,
            },
            doc! { "$set": { "read": true } },
        )
        .await
        .map_err(|e| format!("Failed to mark messages read: {}", e))?;

    Ok(())
}

/// Total unread messages across all of the user's conversations.
pub async fn get_total_unread(db: &MongoDB, user_id: &str) -> Result<i64, String> {
    let collection = db.collection::<Conversation>(CONVERSATIONS);

    let mut cursor = collection
        .find(doc! { "participants": user_id })
        .await
        .map_err(|e| format!("Failed to fetch conversations: {}", e))?;

    let mut total = 0i64;
    while let Some(result) = cursor.next().await {
        match result {
            Ok(conversation) => {
                total += conversation.unread_count.get(user_id).copied().unwrap_or(0)
            }
            Err(e) => log::error!("❌ Error reading conversation document: {}", e),
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_id_is_order_independent() {
        assert_eq!(
            conversation_id_for("alice", "bob"),
            conversation_id_for("bob", "alice")
        );
        assert_eq!(conversation_id_for("alice", "bob"), "alice_bob");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn participant_check_survives_underscored_uids() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/BabHijra".to_string());
        let db = crate::database::MongoDB::new(&uri).await.unwrap();

        // Splitting "a_b_c_d" on '_' would claim "a" is a member
        let conversation = Conversation {
            _id: None,
            conversation_id: conversation_id_for("a_b", "c_d"),
            participants: vec!["a_b".into(), "c_d".into()],
            participant_names: HashMap::new(),
            participant_photos: HashMap::new(),
            last_message: None,
            unread_count: HashMap::new(),
            created_at: 0,
            updated_at: 0,
        };
        let collection = db.collection::<Conversation>(CONVERSATIONS);
        let _ = collection
            .delete_one(doc! { "conversation_id": &conversation.conversation_id })
            .await;
        collection.insert_one(&conversation).await.unwrap();

        let id = &conversation.conversation_id;
        assert!(is_participant(&db, id, "a_b").await.unwrap());
        assert!(is_participant(&db, id, "c_d").await.unwrap());
        assert!(!is_participant(&db, id, "a").await.unwrap());
        assert!(!is_participant(&db, id, "b_c").await.unwrap());

        let _ = collection.delete_one(doc! { "conversation_id": id }).await;
    }
}
