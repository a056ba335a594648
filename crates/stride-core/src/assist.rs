//! AI assistance: chat, suggestions, and goal-scope regeneration.
//!
//! Orchestrates the stride-ai client against the user's own data. The
//! assistant can fail or be unreachable at any time; nothing here writes
//! to the store until the model has answered, so a dead AI backend leaves
//! no half-recorded exchanges.

use crate::conversation;
use crate::error::{StrideError, StrideResult};
use crate::goal::model::Goal;
use crate::task::model::Task;
use serde::Serialize;
use stride_ai::{parse_suggestions, AiClient, ChatMessage};
use stride_cache::Cache;
use stride_db::DbPool;

const SYSTEM_PROMPT: &str = "You are the planning assistant inside Stride, a goal, sprint, and \
task planner. Be concise and practical. When asked for lists, answer with a plain numbered list \
and no commentary.";

/// Result of a chat turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub conversation_id: String,
    pub reply: String,
}

fn ai_err(e: anyhow::Error) -> StrideError {
    StrideError::Ai(e.to_string())
}

/// Run one chat turn, creating the conversation on first contact.
///
/// The exchange is persisted only after the model has replied.
pub async fn chat(
    pool: &DbPool,
    ai: &AiClient,
    user_id: &str,
    conversation_id: Option<&str>,
    message: &str,
) -> StrideResult<ChatOutcome> {
    if message.trim().is_empty() {
        return Err(StrideError::validation("Message must not be empty"));
    }

    // Resolve the thread first so a bad id fails before we call the model
    let existing = match conversation_id {
        Some(id) => Some(conversation::get_conversation(pool, user_id, id).await?),
        None => None,
    };

    let mut turns = vec![ChatMessage::system(SYSTEM_PROMPT)];
    if let Some(convo) = &existing {
        turns.extend(conversation::history_as_chat(pool, &convo.id).await?);
    }
    turns.push(ChatMessage::user(message));

    let reply = ai.chat(turns).await.map_err(ai_err)?;

    let convo = match existing {
        Some(convo) => convo,
        None => conversation::start_conversation(pool, user_id, message).await?,
    };
    conversation::append_exchange(pool, &convo.id, message, &reply).await?;

    Ok(ChatOutcome {
        conversation_id: convo.id,
        reply,
    })
}

/// Suggest new goals, steering the model away from ones that already exist.
pub async fn suggest_goals(
    pool: &DbPool,
    cache: &Cache,
    ai: &AiClient,
    user_id: &str,
    focus: Option<&str>,
) -> StrideResult<Vec<String>> {
    let existing = crate::goal::list_goals(pool, cache, user_id).await?;
    let prompt = goals_prompt(&existing, focus);

    let reply = ai
        .chat(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)])
        .await
        .map_err(ai_err)?;

    Ok(parse_suggestions(&reply))
}

/// Suggest tasks that would move a goal forward.
pub async fn suggest_tasks(
    pool: &DbPool,
    ai: &AiClient,
    user_id: &str,
    goal_id: &str,
) -> StrideResult<Vec<String>> {
    let goal = crate::goal::get_goal(pool, user_id, goal_id).await?;
    let existing = crate::task::list_tasks_by_goal(pool, user_id, goal_id).await?;
    let prompt = tasks_prompt(&goal, &existing);

    let reply = ai
        .chat(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)])
        .await
        .map_err(ai_err)?;

    Ok(parse_suggestions(&reply))
}

/// Ask the model to restate a goal's scope and store it as the description.
pub async fn regenerate_goal_scope(
    pool: &DbPool,
    cache: &Cache,
    ai: &AiClient,
    user_id: &str,
    goal_id: &str,
) -> StrideResult<Goal> {
    let goal = crate::goal::get_goal(pool, user_id, goal_id).await?;
    let prompt = scope_prompt(&goal);

    let reply = ai
        .chat(vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)])
        .await
        .map_err(ai_err)?;

    let scope = reply.trim();
    if scope.is_empty() {
        return Err(StrideError::Ai("Model returned an empty scope".to_string()));
    }

    crate::goal::set_goal_description(pool, cache, user_id, goal_id, scope).await
}

fn goals_prompt(existing: &[Goal], focus: Option<&str>) -> String {
    let mut prompt = String::from("Suggest up to 5 new personal goals");
    if let Some(focus) = focus {
        prompt.push_str(&format!(" focused on: {}", focus.trim()));
    }
    prompt.push('.');
    if !existing.is_empty() {
        prompt.push_str("\nDo not repeat these existing goals:\n");
        for goal in existing {
            prompt.push_str(&format!("- {}\n", goal.title));
        }
    }
    prompt
}

fn tasks_prompt(goal: &Goal, existing: &[Task]) -> String {
    let mut prompt = format!(
        "Suggest up to 5 concrete next tasks for the goal \"{}\".",
        goal.title
    );
    if let Some(description) = &goal.description {
        prompt.push_str(&format!("\nGoal scope: {}", description));
    }
    if !existing.is_empty() {
        prompt.push_str("\nDo not repeat these existing tasks:\n");
        for task in existing {
            prompt.push_str(&format!("- {}\n", task.title));
        }
    }
    prompt
}

fn scope_prompt(goal: &Goal) -> String {
    let mut prompt = format!(
        "Rewrite the scope of the goal \"{}\" as one short paragraph stating what is in and out \
of scope. Reply with the paragraph only.",
        goal.title
    );
    if let Some(description) = &goal.description {
        prompt.push_str(&format!("\nCurrent scope: {}", description));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::model::GoalStatus;

    fn goal(title: &str, description: Option<&str>) -> Goal {
        Goal {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            status: GoalStatus::Active,
            target_date: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn goals_prompt_lists_existing_titles() {
        let existing = vec![goal("Run a marathon", None), goal("Read 12 books", None)];
        let prompt = goals_prompt(&existing, Some("health"));
        assert!(prompt.contains("health"));
        assert!(prompt.contains("- Run a marathon"));
        assert!(prompt.contains("- Read 12 books"));
    }

    #[test]
    fn goals_prompt_without_context_is_minimal() {
        let prompt = goals_prompt(&[], None);
        assert!(!prompt.contains("existing"));
    }

    #[test]
    fn scope_prompt_carries_current_description() {
        let prompt = scope_prompt(&goal("Run a marathon", Some("Finish under 4 hours")));
        assert!(prompt.contains("Run a marathon"));
        assert!(prompt.contains("Finish under 4 hours"));
    }
}
