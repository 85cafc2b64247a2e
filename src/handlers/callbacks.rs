use std::sync::Arc;

use chrono::Local;
use log::error;
use teloxide::prelude::*;
use teloxide::types::{InputFile, Message, MessageId};
use teloxide::{ApiError, RequestError};

use crate::chart::render_weekly_chart;
use crate::internal_error::InternalResult;
use crate::records::data::UserID;
use crate::records::helpers::{
    delete_task_from_db, get_goals_from_db, get_subject_totals, get_tasks_on_date,
    get_weekly_stats, set_task_completed, trailing_window_start,
};
use crate::reports;
use crate::session::AwaitMode;
use crate::AppState;

/// Pressing a button twice in a row can produce an edit with identical
/// content, which Telegram rejects. That rejection is not a failure.
fn ignore_unmodified(result: Result<Message, RequestError>) -> InternalResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<AppState>) -> InternalResult<()> {
    let message = match &q.message {
        Some(message) => message,
        None => return Ok(()),
    };
    let data = match &q.data {
        Some(data) => data.as_str(),
        None => return Ok(()),
    };

    let user_id = q.from.id.0 as UserID;
    let first_name = q.from.first_name.clone();
    let chat_id = message.chat.id;
    let message_id = message.id;

    if let Err(e) = route_callback(
        &bot, &q.id, data, user_id, &first_name, chat_id, message_id, &state,
    )
    .await
    {
        error!("Callback '{}' failed for user {}: {}", data, user_id, e);
        bot.send_message(chat_id, reports::GENERIC_ERROR).await?;
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn route_callback(
    bot: &Bot,
    callback_id: &str,
    data: &str,
    user_id: UserID,
    first_name: &str,
    chat_id: ChatId,
    message_id: MessageId,
    state: &AppState,
) -> InternalResult<()> {
    if let Some(raw_id) = data.strip_prefix("complete_") {
        let task_id = match raw_id.parse() {
            Ok(task_id) => task_id,
            Err(_) => return Ok(()),
        };
        {
            let db = state.db.lock()?;
            set_task_completed(task_id, user_id, &db)?;
        }
        bot.answer_callback_query(callback_id)
            .text("✅ Task completed!")
            .await?;
        return show_schedule(bot, user_id, chat_id, message_id, state).await;
    }

    if let Some(raw_id) = data.strip_prefix("delete_") {
        let task_id = match raw_id.parse() {
            Ok(task_id) => task_id,
            Err(_) => return Ok(()),
        };
        {
            let db = state.db.lock()?;
            delete_task_from_db(task_id, user_id, &db)?;
        }
        bot.answer_callback_query(callback_id)
            .text("🗑 Task deleted!")
            .await?;
        return show_schedule(bot, user_id, chat_id, message_id, state).await;
    }

    match data {
        "schedule" => {
            bot.answer_callback_query(callback_id).await?;
            show_schedule(bot, user_id, chat_id, message_id, state).await
        }
        "study" => {
            bot.answer_callback_query(callback_id).await?;
            show_study(bot, user_id, chat_id, message_id, state).await
        }
        "goals" => {
            bot.answer_callback_query(callback_id).await?;
            show_goals(bot, user_id, chat_id, message_id, state).await
        }
        "analytics" => {
            bot.answer_callback_query(callback_id).await?;
            show_analytics(bot, user_id, chat_id, message_id, state).await
        }
        "add_task" => {
            bot.answer_callback_query(callback_id).await?;
            prompt_for_input(
                bot,
                user_id,
                chat_id,
                message_id,
                AwaitMode::Task,
                reports::TASK_PROMPT,
                state,
            )
            .await
        }
        "add_study" => {
            bot.answer_callback_query(callback_id).await?;
            prompt_for_input(
                bot,
                user_id,
                chat_id,
                message_id,
                AwaitMode::Study,
                reports::STUDY_PROMPT,
                state,
            )
            .await
        }
        "add_goal" => {
            bot.answer_callback_query(callback_id).await?;
            prompt_for_input(
                bot,
                user_id,
                chat_id,
                message_id,
                AwaitMode::Goal,
                reports::GOAL_PROMPT,
                state,
            )
            .await
        }
        "back" => {
            bot.answer_callback_query(callback_id).await?;
            ignore_unmodified(
                bot.edit_message_text(chat_id, message_id, reports::menu_text(first_name))
                    .reply_markup(reports::menu_keyboard())
                    .await,
            )
        }
        // Buttons from messages of an older build are dropped quietly.
        _ => Ok(()),
    }
}

async fn show_schedule(
    bot: &Bot,
    user_id: UserID,
    chat_id: ChatId,
    message_id: MessageId,
    state: &AppState,
) -> InternalResult<()> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let tasks = {
        let db = state.db.lock()?;
        get_tasks_on_date(user_id, &today, &db)?
    };

    ignore_unmodified(
        bot.edit_message_text(chat_id, message_id, reports::schedule_text(&tasks))
            .reply_markup(reports::schedule_keyboard(&tasks))
            .await,
    )
}

async fn show_study(
    bot: &Bot,
    user_id: UserID,
    chat_id: ChatId,
    message_id: MessageId,
    state: &AppState,
) -> InternalResult<()> {
    let totals = {
        let db = state.db.lock()?;
        get_subject_totals(user_id, &db)?
    };

    ignore_unmodified(
        bot.edit_message_text(chat_id, message_id, reports::study_text(&totals))
            .reply_markup(reports::study_keyboard())
            .await,
    )
}

async fn show_goals(
    bot: &Bot,
    user_id: UserID,
    chat_id: ChatId,
    message_id: MessageId,
    state: &AppState,
) -> InternalResult<()> {
    let goals = {
        let db = state.db.lock()?;
        get_goals_from_db(user_id, &db)?
    };

    ignore_unmodified(
        bot.edit_message_text(chat_id, message_id, reports::goals_text(&goals))
            .reply_markup(reports::goals_keyboard())
            .await,
    )
}

async fn show_analytics(
    bot: &Bot,
    user_id: UserID,
    chat_id: ChatId,
    message_id: MessageId,
    state: &AppState,
) -> InternalResult<()> {
    let window_start = trailing_window_start(Local::now().date_naive())
        .format("%Y-%m-%d")
        .to_string();
    let stats = {
        let db = state.db.lock()?;
        get_weekly_stats(user_id, &window_start, &db)?
    };

    let png = render_weekly_chart(&stats)?;
    bot.send_photo(
        chat_id,
        InputFile::memory(png).file_name("productivity.png"),
    )
    .caption(reports::analytics_caption(&stats))
    .reply_markup(reports::back_keyboard())
    .await?;

    ignore_unmodified(
        bot.edit_message_text(chat_id, message_id, reports::CHART_SENT)
            .await,
    )
}

async fn prompt_for_input(
    bot: &Bot,
    user_id: UserID,
    chat_id: ChatId,
    message_id: MessageId,
    mode: AwaitMode,
    prompt: &str,
    state: &AppState,
) -> InternalResult<()> {
    state.sessions.set_awaiting(user_id, mode)?;

    ignore_unmodified(bot.edit_message_text(chat_id, message_id, prompt).await)
}
