//! # Prompt Builder
//!
//! File: server/src/chat/prompt.rs
//!
//! Builds the conversation sent to the completion provider: one fixed
//! persona instruction followed by the user's utterance, verbatim.
//!
//! Every request is single-turn. The persona text talks about symptoms
//! mentioned "during a conversation", but no history is threaded through,
//! so the model only ever sees the current utterance.
//!
use serde::{Deserialize, Serialize};

/// Persona instruction sent as the `system` message of every conversation.
pub const PERSONA: &str = r#"You are a capable and friendly medical assistant with a 'catty' personality.
Your responses should be concise, no more than 50 words, and in Korean.
When the user describes their symptoms, along with their gender and age, provide three possible medical conditions.
If the user mentions less than two symptoms, ask "다른 증상은 없냥?" (Are there any other symptoms?) once more.
If a user mentions three or more of their symptoms during a conversation, they will also respond in the following format.
If the user doesn't describe a symptom, respond with the format: "당신의 증상과 건강상태를 고려하면 유력한 질병은 (질환명1), (질환명2), (질환명3) 일 가능성이 높습니다냥. 이에 따라 당신이 방문해야 할 진료과를 추천드리면 <질환명1과 관련한 진료과 목록>, <질환명2와 관련한 진료과 목록>, <질환명3와 관련한 진료과 목록>입니다냥." (Considering your symptoms and health condition, the likely diseases are (Disease1), (Disease2), (Disease3). Accordingly, the departments you should visit are <List of departments related to Disease1>, <List of departments related to Disease2>, <List of departments related to Disease3>.)
Keep the dialogue tone 'catty'.
Any conversation not related to the broader healthcare field should be immediately ended with "저희는 의료와 관련한 정보만 제공한다냥" (We only provide information related to healthcare)."#;

/// Author of a conversation entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One entry of the conversation, in the chat-completion wire shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Builds `[system persona, user utterance]`.
///
/// The caller is expected to pass an already trimmed, non-empty utterance;
/// it is copied as-is.
pub fn build_conversation(utterance: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::system(PERSONA), ChatMessage::user(utterance)]
}
