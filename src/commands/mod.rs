pub mod category;
pub mod goal;
pub mod init;
pub mod sessions;
pub mod task;
pub mod timer;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure timer lengths, daily goal and sound")]
    Init(init::InitArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage task categories")]
    Category(category::CategoryArgs),
    #[command(about = "Run a work session or a break")]
    Timer(timer::TimerArgs),
    #[command(about = "List recorded sessions")]
    Sessions(sessions::SessionsArgs),
    #[command(about = "Show or set the daily goal")]
    Goal(goal::GoalArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args).await,
            Commands::Category(args) => category::cmd(args).await,
            Commands::Timer(args) => timer::cmd(args).await,
            Commands::Sessions(args) => sessions::cmd(args).await,
            Commands::Goal(args) => goal::cmd(args).await,
        }
    }
}
