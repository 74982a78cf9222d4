use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "For starting the bot")]
    Start,
    #[command(description = "For getting help")]
    Help,
    #[command(description = "For getting info")]
    Info,
    #[command(description = "For write comments")]
    Comment,
    #[command(description = "Admin panel (admin only)")]
    Admin,
}
