//! Summary and chart CLI commands

use crate::chart::{ChartAnimationEngine, ChartKind, StepScheduler};
use crate::display::{format_chart, format_monthly_summary};
use crate::error::KakeiboResult;
use crate::services::Household;

use super::transaction::month_or_current;

/// Print the monthly income/expense report
pub fn handle_summary_command(household: &mut Household, month: Option<&str>) -> KakeiboResult<()> {
    let (year, month) = month_or_current(month)?;
    let summary = household.monthly_summary(year, month);
    print!("{}", format_monthly_summary(&summary));
    Ok(())
}

/// Run a chart to its settled frame and print it
pub fn handle_chart_command(
    household: &mut Household,
    kind: ChartKind,
    month: Option<&str>,
) -> KakeiboResult<()> {
    let (year, month) = month_or_current(month)?;
    let summary = household.monthly_summary(year, month);

    let mut engine = ChartAnimationEngine::new(kind);
    let mut steps = StepScheduler::new();
    engine.show_summary(&summary, household.settings(), &mut steps);
    while let Some(tick) = steps.pop() {
        engine.on_tick(tick, &mut steps);
    }

    print!("{}", format_chart(&engine));
    Ok(())
}
