//! Format → strategy lookup.

use crate::logic::strategy::TournamentStrategy;
use crate::models::{TournamentError, TournamentFormat};
use std::collections::HashMap;

/// Lookup table of the strategies enabled for this deployment.
#[derive(Clone, Debug)]
pub struct StrategySelector {
    table: HashMap<TournamentFormat, TournamentStrategy>,
}

impl StrategySelector {
    /// Selector with every known format enabled.
    pub fn new() -> Self {
        Self::with_formats(TournamentFormat::ALL)
    }

    /// Selector restricted to `formats`. Other formats fail with `UnsupportedFormat`.
    pub fn with_formats(formats: impl IntoIterator<Item = TournamentFormat>) -> Self {
        let table = formats
            .into_iter()
            .map(|format| (format, strategy_for(format)))
            .collect();
        Self { table }
    }

    pub fn get_strategy(&self, format: TournamentFormat) -> Result<TournamentStrategy, TournamentError> {
        self.table
            .get(&format)
            .copied()
            .ok_or(TournamentError::UnsupportedFormat(format))
    }

    /// Enabled formats, sorted.
    pub fn formats(&self) -> Vec<TournamentFormat> {
        let mut formats: Vec<_> = self.table.keys().copied().collect();
        formats.sort();
        formats
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new()
    }
}

fn strategy_for(format: TournamentFormat) -> TournamentStrategy {
    match format {
        TournamentFormat::Quadrangular => TournamentStrategy::Quadrangular,
        TournamentFormat::RoundRobin => TournamentStrategy::RoundRobin,
    }
}
