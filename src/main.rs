use anyhow::Result;
use clap::{Parser, Subcommand};

use kakeibo::chart::ChartKind;
use kakeibo::cli::{
    handle_chart_command, handle_colors_command, handle_summary_command, handle_todo_command,
    handle_transaction_command, ColorsCommands, TodoCommands, TransactionCommands,
};
use kakeibo::config::{KakeiboPaths, Theme};
use kakeibo::logging::{init_tracing, LogTarget};
use kakeibo::services::Household;

#[derive(Parser)]
#[command(
    name = "kakeibo",
    version,
    about = "Terminal household ledger",
    long_about = "Kakeibo records income, expenses, and todos, and shows monthly \
                  summaries with animated category charts. Run without a \
                  subcommand to open the interactive dashboard."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Transaction commands
    #[command(subcommand, alias = "t")]
    Txn(TransactionCommands),

    /// Todo commands
    #[command(subcommand)]
    Todo(TodoCommands),

    /// Monthly income, expense, and category breakdown
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Run a chart to its final frame and print it
    Chart {
        /// expense, income, or balance
        kind: ChartKind,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Chart color settings
    #[command(subcommand)]
    Colors(ColorsCommands),

    /// Show configuration, optionally changing the theme
    Config {
        /// Theme key (default_light_gray, pastel_mint, soft_lavender)
        #[arg(long)]
        theme: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = KakeiboPaths::new()?;

    let command = cli.command.unwrap_or(Commands::Tui);
    if matches!(command, Commands::Tui) {
        paths.ensure_directories()?;
        init_tracing(LogTarget::File(&paths.log_file()));
    } else {
        init_tracing(LogTarget::Stderr);
    }

    let mut household = Household::open(paths.clone())?;
    for issue in household.storage().load_issues() {
        tracing::warn!(?issue, "started with empty data");
    }

    match command {
        Commands::Tui => kakeibo::tui::run_tui(&mut household)?,
        Commands::Txn(cmd) => handle_transaction_command(&mut household, cmd)?,
        Commands::Todo(cmd) => handle_todo_command(&mut household, cmd)?,
        Commands::Summary { month } => handle_summary_command(&mut household, month.as_deref())?,
        Commands::Chart { kind, month } => {
            handle_chart_command(&mut household, kind, month.as_deref())?
        }
        Commands::Colors(cmd) => handle_colors_command(&mut household, cmd)?,
        Commands::Config { theme } => {
            if let Some(key) = theme {
                let theme: Theme = key.parse()?;
                household.settings_mut().set_theme(theme)?;
                println!("Theme set to {}", theme.label());
            }

            let settings = household.settings();
            println!("Kakeibo Configuration");
            println!("=====================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Transactions:     {}", paths.transactions_file().display());
            println!("Todos:            {}", paths.todos_file().display());
            println!("Settings:         {}", paths.settings_file().display());
            println!("Log file (TUI):   {}", paths.log_file().display());
            println!();
            println!("Theme:            {} ({})", settings.theme().label(), settings.theme());
            println!("Recorded:         {} transactions, {} todos", household.ledger().len(), household.todos().len());
            if let Some(issue) = settings.load_issue() {
                println!("Settings file ignored: {:?}", issue);
            }
        }
    }

    Ok(())
}
