//! ragbot entrypoint: config, logging, clients, poll loop

use std::sync::Arc;
use std::time::Duration;

use ragbot::router::Router;
use ragbot_core::config::{Config, COMPLETION_MODEL, INDEX_NAME};
use ragbot_core::logging::init_logging;
use ragbot_providers::openai::OpenAi;
use ragbot_providers::pinecone::Pinecone;
use ragbot_providers::telegram::Telegram;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(&config.log_dir, "ragbot.log", &config.log_level)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting ragbot");

    // One long-lived client per external service, shared by all handlers.
    let openai = Arc::new(OpenAi::new(&config.openai_api_key, COMPLETION_MODEL)?);
    let pinecone = Pinecone::new(&config.pinecone_api_key, &config.pinecone_environment)?;
    let index = Arc::new(pinecone.connect(INDEX_NAME).await?);
    let telegram = Telegram::new(&config.telegram_token)?;

    let router = Arc::new(Router::new(
        openai.clone(),
        index,
        openai,
        Arc::new(telegram.clone()),
    ));

    tracing::info!("polling for updates");

    let mut offset = 0i64;
    loop {
        match telegram.poll(offset).await {
            Ok(polled) => {
                offset = polled.next_offset;
                for event in polled.events {
                    // Each event runs its own independent chain; one failing
                    // upload never affects another user's query.
                    let router = Arc::clone(&router);
                    let telegram = telegram.clone();
                    tokio::spawn(async move {
                        let reply = router.handle(event).await;
                        if let Err(e) = telegram.send_message(reply.chat_id, &reply.text).await {
                            tracing::warn!("failed to send reply: {}", e);
                        }
                    });
                }
            }
            Err(e) => {
                tracing::warn!("update poll failed: {}", e);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}
