use std::collections::HashMap;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::DatingProfile;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LastMessage {
    pub content: String,
    pub sender_id: String,
    pub timestamp: i64,
}

/// Conversation document. Exactly two participants; per-participant display
/// data is denormalized so the inbox can render without extra lookups.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Conversation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub conversation_id: String,
    pub participants: Vec<String>,
    pub participant_names: HashMap<String, String>,
    pub participant_photos: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<LastMessage>,
    pub unread_count: HashMap<String, i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Message document in the flat `messages` collection, linked to its
/// conversation by `conversation_id`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub message_id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub sender_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_photo: Option<String>,
    pub content: String,
    pub timestamp: i64,
    pub read: bool,
}

/// Inbox entry: a conversation enriched with the other participant's profile.
#[derive(Debug, Serialize)]
pub struct ConversationWithProfile {
    pub conversation: Conversation,
    pub other_user_profile: DatingProfile,
}
