extern crate alloc;


use serenity::http::Http;
use serenity::prelude::{Client, GatewayIntents};

use std::sync::Arc;

use utility::*;
use commands::command_manager::CommandManager;
use databases::Store;
use handler::Handler;
use state::BotState;

mod handler;
mod state;
mod utility;
mod databases;
mod commands;


#[tokio::main]
async fn main() -> anyhow::Result<()> {

    // setup
    let config = BotConfig::from_env()?;
    let store = Store::open(&config.store_path).await?;
    let http = Arc::new(Http::new(&config.token));
    let gateway: Arc<dyn Gateway> = Arc::new(Resolver::new(Arc::clone(&http)));

    let token = config.token.clone();
    let state = BotState::new(config, store, gateway);
    let handler = Handler::new(state, CommandManager::new());

    let intents = GatewayIntents::GUILDS        |
                  GatewayIntents::GUILD_MEMBERS |
                  GatewayIntents::GUILD_MESSAGES;
    let mut client = Client::builder(token, intents)
        .event_handler(handler)
        .await?;

    Logger::info("Starting client");
    client.start().await?;
    Ok(())
}
