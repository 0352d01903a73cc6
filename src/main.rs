use clap::Parser;
use kb_chat::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let global = cli.global;

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => cli::chat::run(&global).await,
        Command::Kb(args) => cli::kb::run(&global, args).await,
        Command::Ask(args) => cli::ask::run(&global, args).await,
        Command::Upload(args) => cli::upload::run(&global, args).await,
        Command::Render(args) => cli::render::run(&global, args).await,
    }
}
