use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ForceReply, MessageEntity, MessageEntityKind, ParseMode};

use crate::bot::{responder, Command};
use crate::config::AppConfig;
use crate::error::ExchangeError;
use crate::exchange::binance::BinanceClient;
use crate::model::Sender;
use crate::portfolio::{value_account, Valuation};

type HandlerError = Box<dyn std::error::Error + Send + Sync>;
type HandlerResult = Result<(), HandlerError>;

/// Command → handler table, built once at startup
pub fn schema() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(answer_command),
        )
        .branch(dptree::filter(|msg: Message| should_echo(msg.text(), msg.entities())).endpoint(echo_message))
}

async fn answer_command(bot: Bot, msg: Message, cmd: Command, config: Arc<AppConfig>) -> HandlerResult {
    let sender = msg.from.as_ref().map(Sender::from);
    info!("/{:?} from {:?}", cmd, sender.as_ref().map(|s| s.id));

    match cmd {
        Command::Start => match sender {
            Some(sender) => {
                bot.send_message(msg.chat.id, responder::greet(&sender))
                    .parse_mode(ParseMode::MarkdownV2)
                    .reply_markup(ForceReply::new().selective())
                    .await?;
            }
            None => {
                bot.send_message(msg.chat.id, "Hi!").await?;
            }
        },
        Command::Help => {
            bot.send_message(msg.chat.id, responder::help()).await?;
        }
        Command::Binance => {
            if !may_query_balance(&config, sender.as_ref()) {
                warn!("Balance query refused for {:?}", sender.as_ref().map(|s| s.id));
                bot.send_message(msg.chat.id, responder::NOT_ALLOWED).await?;
                return Ok(());
            }

            bot.send_chat_action(msg.chat.id, ChatAction::Typing).await?;

            let reply = responder::balance_reply(&report_balance(&config).await);
            bot.send_message(msg.chat.id, reply).await?;
        }
    }

    Ok(())
}

async fn echo_message(bot: Bot, msg: Message) -> HandlerResult {
    if let Some(text) = msg.text() {
        bot.send_message(msg.chat.id, responder::echo(text)).await?;
    }
    Ok(())
}

/// Fresh exchange client per query, dropped once the valuation is done
async fn report_balance(config: &AppConfig) -> Result<Valuation, ExchangeError> {
    let client = BinanceClient::from_config(config)?;
    value_account(&client).await
}

/// Only plain text is echoed. A message opening with a bot command entity is a
/// command, known or not, and is never echoed.
fn should_echo(text: Option<&str>, entities: Option<&[MessageEntity]>) -> bool {
    let starts_with_command = entities.is_some_and(|entities| {
        entities
            .iter()
            .any(|e| e.offset == 0 && matches!(e.kind, MessageEntityKind::BotCommand))
    });

    text.is_some() && !starts_with_command
}

fn may_query_balance(config: &AppConfig, sender: Option<&Sender>) -> bool {
    match sender {
        Some(sender) => config.is_user_allowed(sender.id),
        None => config.telegram.allowed_user_ids.is_empty(),
    }
}
