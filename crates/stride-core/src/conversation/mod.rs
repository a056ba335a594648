//! AI conversation persistence.

pub mod model;

use crate::error::{StrideError, StrideResult};
use model::{Conversation, ConversationDetail, Message};
use stride_db::queries::conversations as queries;
use stride_db::DbPool;
use uuid::Uuid;

/// Conversation titles derive from the opening message, truncated for lists.
const TITLE_MAX_LEN: usize = 60;

pub(crate) fn title_from_message(message: &str) -> String {
    let line = message.trim().lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return "New conversation".to_string();
    }
    if line.len() <= TITLE_MAX_LEN {
        return line.to_string();
    }
    // Back off to a char boundary, then prefer the last word break
    let mut cut = TITLE_MAX_LEN;
    while !line.is_char_boundary(cut) {
        cut -= 1;
    }
    let boundary = line[..cut].rfind(' ').unwrap_or(cut);
    format!("{}...", &line[..boundary])
}

/// Start a new conversation titled after the opening message.
pub async fn start_conversation(
    pool: &DbPool,
    user_id: &str,
    opening_message: &str,
) -> StrideResult<Conversation> {
    let id = Uuid::new_v4().to_string();
    let title = title_from_message(opening_message);
    let row = queries::create_conversation(pool, &id, user_id, &title)?;
    Ok(Conversation::from_row(row))
}

/// Get a conversation header. Other users' conversations surface as not found.
pub async fn get_conversation(pool: &DbPool, user_id: &str, id: &str) -> StrideResult<Conversation> {
    let row = queries::get_conversation(pool, user_id, id)?
        .ok_or_else(|| StrideError::ConversationNotFound(id.to_string()))?;
    Ok(Conversation::from_row(row))
}

/// Get a conversation with its full message history.
pub async fn get_conversation_detail(
    pool: &DbPool,
    user_id: &str,
    id: &str,
) -> StrideResult<ConversationDetail> {
    let conversation = get_conversation(pool, user_id, id).await?;
    let messages = queries::list_messages(pool, id)?
        .into_iter()
        .map(Message::from_row)
        .collect();
    Ok(ConversationDetail { conversation, messages })
}

/// List a user's conversations, most recently active first.
pub async fn list_conversations(pool: &DbPool, user_id: &str) -> StrideResult<Vec<Conversation>> {
    let rows = queries::list_conversations(pool, user_id)?;
    Ok(rows.into_iter().map(Conversation::from_row).collect())
}

/// Append one exchange (user message + assistant reply) to a conversation.
pub async fn append_exchange(
    pool: &DbPool,
    conversation_id: &str,
    user_message: &str,
    assistant_reply: &str,
) -> StrideResult<()> {
    queries::append_message(
        pool,
        &Uuid::new_v4().to_string(),
        conversation_id,
        "user",
        user_message,
    )?;
    queries::append_message(
        pool,
        &Uuid::new_v4().to_string(),
        conversation_id,
        "assistant",
        assistant_reply,
    )?;
    queries::touch_conversation(pool, conversation_id)?;
    Ok(())
}

/// Load a conversation's history as chat turns for the AI client.
pub async fn history_as_chat(
    pool: &DbPool,
    conversation_id: &str,
) -> StrideResult<Vec<stride_ai::ChatMessage>> {
    let messages = queries::list_messages(pool, conversation_id)?;
    Ok(messages
        .into_iter()
        .map(|m| stride_ai::ChatMessage { role: m.role, content: m.content })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_db::migrations::run_migrations;

    async fn setup() -> (DbPool, String) {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        let user = crate::user::register(&pool, "ada@example.com", "correcthorse", None)
            .await
            .unwrap();
        (pool, user.user.id)
    }

    #[tokio::test]
    async fn exchange_round_trip() {
        let (pool, user_id) = setup().await;

        let convo = start_conversation(&pool, &user_id, "Help me plan my quarter")
            .await
            .unwrap();
        assert_eq!(convo.title, "Help me plan my quarter");

        append_exchange(&pool, &convo.id, "Help me plan my quarter", "Sure. What matters most?")
            .await
            .unwrap();

        let detail = get_conversation_detail(&pool, &user_id, &convo.id).await.unwrap();
        assert_eq!(detail.messages.len(), 2);
        assert_eq!(detail.messages[0].role, "user");
        assert_eq!(detail.messages[1].role, "assistant");

        let history = history_as_chat(&pool, &convo.id).await.unwrap();
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn conversations_are_user_scoped() {
        let (pool, user_id) = setup().await;
        let other = crate::user::register(&pool, "bob@example.com", "correcthorse", None)
            .await
            .unwrap();

        let convo = start_conversation(&pool, &user_id, "Mine").await.unwrap();

        assert!(matches!(
            get_conversation_detail(&pool, &other.user.id, &convo.id).await,
            Err(StrideError::ConversationNotFound(_))
        ));
        assert!(list_conversations(&pool, &other.user.id).await.unwrap().is_empty());
    }

    #[test]
    fn titles_are_derived_and_truncated() {
        assert_eq!(title_from_message("  Plan my week  "), "Plan my week");
        assert_eq!(title_from_message("\n\n"), "New conversation");
        let long = "plan ".repeat(30);
        let title = title_from_message(&long);
        assert!(title.len() <= TITLE_MAX_LEN + 3);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn multibyte_titles_truncate_on_char_boundaries() {
        let message = format!("ab{}", "日".repeat(30));
        let title = title_from_message(&message);
        assert!(title.ends_with("..."));
        assert!(title.len() <= TITLE_MAX_LEN + 3);
    }
}
