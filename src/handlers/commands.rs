use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::internal_error::InternalResult;
use crate::reports;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    Start,
    Help,
}

pub async fn handle_command(bot: Bot, msg: Message, command: Command) -> InternalResult<()> {
    match command {
        Command::Start => {
            let first_name = msg
                .from()
                .map(|user| user.first_name.as_str())
                .unwrap_or("there");
            bot.send_message(msg.chat.id, reports::menu_text(first_name))
                .reply_markup(reports::menu_keyboard())
                .await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, reports::help_text()).await?;
        }
    }

    Ok(())
}
