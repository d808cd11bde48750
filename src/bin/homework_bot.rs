//! Homework status bot.
//!
//! Polls the Practicum homework API every retry period and forwards status
//! changes (and failures) to a Telegram chat. Exits non-zero only when the
//! configuration is unusable.

use homework_bot::channels::Notifier;
use homework_bot::channels::telegram::TelegramAdapter;
use homework_bot::practicum::PracticumClient;
use homework_bot::{BotConfig, Poller};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::load()?;
    let _log_guard = homework_bot::diagnostics::init_logging(&config.log)?;

    if !config.check_tokens() {
        let missing = config.missing_tokens();
        tracing::error!(
            severity = "critical",
            ?missing,
            "Отсутствие обязательных переменных окружения"
        );
    }
    let credentials = config.credentials()?;

    let source = PracticumClient::from_config(&config, &credentials)?;
    let adapter = TelegramAdapter::from_config(&config, &credentials)?;
    let notifier = Notifier::new(Arc::new(adapter), credentials.telegram_chat_id.clone());

    if !notifier.is_healthy().await {
        tracing::warn!("telegram health check failed; continuing, sends may fail");
    }

    Poller::new(Arc::new(source), notifier)
        .with_retry_period(config.retry_period())
        .with_cursor_advance(config.advance_cursor)
        .run()
        .await;

    Ok(())
}
