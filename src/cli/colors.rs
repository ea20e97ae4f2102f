//! Chart color CLI commands

use clap::Subcommand;

use crate::config::palette::available_swatches;
use crate::error::KakeiboResult;
use crate::models::{HexColor, TransactionKind};
use crate::services::Household;

/// Color subcommands
#[derive(Subcommand)]
pub enum ColorsCommands {
    /// Show the palette for expense and/or income categories
    List {
        /// Only this kind (income or expense)
        kind: Option<TransactionKind>,
    },
    /// Assign a color to a category
    Set {
        /// income or expense
        kind: TransactionKind,
        /// Category name
        category: String,
        /// Color as #rrggbb
        color: String,
    },
    /// Restore the built-in palette
    Reset {
        /// income or expense
        kind: TransactionKind,
    },
    /// Show palette swatches not yet used by a kind
    Swatches {
        /// income or expense
        kind: TransactionKind,
    },
}

/// Handle a colors command
pub fn handle_colors_command(household: &mut Household, cmd: ColorsCommands) -> KakeiboResult<()> {
    match cmd {
        ColorsCommands::List { kind } => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => vec![TransactionKind::Expense, TransactionKind::Income],
            };
            for kind in kinds {
                println!("{} ({})", kind.label(), kind);
                for (label, color) in household.settings().colors(kind) {
                    println!("  {}  {}", color, label);
                }
            }
        }

        ColorsCommands::Set {
            kind,
            category,
            color,
        } => {
            let color = household
                .settings_mut()
                .set_color(kind, &category, &color)?;
            println!("{} {} → {}", kind.label(), category.trim(), color);
        }

        ColorsCommands::Reset { kind } => {
            household.settings_mut().reset_colors(kind)?;
            println!("Reset {} colors to defaults", kind);
        }

        ColorsCommands::Swatches { kind } => {
            let used: Vec<HexColor> = household
                .settings()
                .colors(kind)
                .into_iter()
                .map(|(_, color)| color)
                .collect();
            for swatch in available_swatches(&used) {
                println!("  {}  {}", swatch.color, swatch.name);
            }
        }
    }

    Ok(())
}
