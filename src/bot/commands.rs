use teloxide::utils::command::BotCommands;

/// Commands understood by the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "say hi.")]
    Start,
    #[command(description = "display this text.")]
    Help,
    #[command(description = "total value of the Binance spot account in USDT.")]
    Binance,
}
