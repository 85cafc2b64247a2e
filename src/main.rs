use rusqlite::Connection;

use std::env;
use std::error::Error;
use std::fs;
use std::sync::{Arc, Mutex};

use log::{info, warn};
use teloxide::prelude::*;

mod chart;
mod handlers;
mod internal_error;
mod parser;
mod records;
mod reports;
mod session;

use handlers::Command;
use records::helpers::init_schema;
use session::SessionMap;

const BOT_TOKEN: &str = "PASTE_YOUR_BOT_TOKEN_HERE";
const DB_PATH: &str = "data/study_assistant.db";

pub struct AppState {
    pub db: Mutex<Connection>,
    pub sessions: SessionMap,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let token = env::var("ASSISTANT_BOT_TOKEN").unwrap_or_else(|_| BOT_TOKEN.to_string());
    if token == "PASTE_YOUR_BOT_TOKEN_HERE" {
        warn!("No bot token configured; set ASSISTANT_BOT_TOKEN or edit BOT_TOKEN");
        return Ok(());
    }

    fs::create_dir_all("data")?;
    let connection = Connection::open(DB_PATH)?;
    init_schema(&connection)?;
    info!("Database ready at {}", DB_PATH);

    let state = Arc::new(AppState {
        db: Mutex::new(connection),
        sessions: SessionMap::new(),
    });

    let bot = Bot::new(token);

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handlers::handle_command),
        )
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

    info!("Starting study assistant bot");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
