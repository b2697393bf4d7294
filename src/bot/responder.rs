use colored::*;
use teloxide::utils::command::BotCommands;

use crate::bot::Command;
use crate::error::ExchangeError;
use crate::helpers::escape_markdown;
use crate::model::{Sender, STABLECOIN_UNIT};
use crate::portfolio::Valuation;

/// Reply when a command fails for reasons outside the user's control
pub const COMMAND_FAILED: &str = "⚠️ Command failed, please try again later.";

/// Reply when the sender is not on the balance allow-list
pub const NOT_ALLOWED: &str = "⛔ You are not allowed to use this command.";

/// Greeting mentioning the user, formatted for MarkdownV2
pub fn greet(sender: &Sender) -> String {
    format!(
        "Hi [{}](tg://user?id={})\\!",
        escape_markdown(&sender.display_name),
        sender.id
    )
}

pub fn help() -> String {
    Command::descriptions().to_string()
}

pub fn echo(text: &str) -> String {
    text.to_string()
}

/// Reply for a `/binance` query. Any top-level failure becomes `COMMAND_FAILED`.
pub fn balance_reply(result: &Result<Valuation, ExchangeError>) -> String {
    match result {
        Ok(valuation) => {
            info!(
                "Reported {} USDT (BTCUSDT @ {}, {} asset(s) skipped)",
                valuation.formatted_total(),
                valuation.reference_price,
                valuation.skipped.len()
            );
            balance_report(valuation)
        }
        Err(e) => {
            error!("{}", format!("❌ Balance query failed: {}", e).on_red());
            COMMAND_FAILED.to_string()
        }
    }
}

/// Plain-text reply for a finished valuation
pub fn balance_report(valuation: &Valuation) -> String {
    let mut report = format!("{} {}", valuation.formatted_total(), STABLECOIN_UNIT);

    if valuation.is_partial() {
        let assets: Vec<String> = valuation
            .skipped
            .iter()
            .map(|s| format!("{} ({})", s.asset, s.reason))
            .collect();
        report.push_str(&format!("\nNot counted: {}", assets.join(", ")));
    }

    report
}
