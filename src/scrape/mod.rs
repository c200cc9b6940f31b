//! Best-effort extraction of "Quick Stats" from team profile pages.
//!
//! Profile markup is not under our control and changes without notice, so
//! extraction is a list of [`StatsStrategy`] implementations tried in order.
//! The first strategy that yields any entries wins; results from different
//! strategies are never merged. A page with no recognizable stats block
//! yields an empty list, never an error.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod strategies;

pub use strategies::{GridStrategy, TableStrategy};

use scraper::{ElementRef, Html};
use serde::Serialize;
use tracing::debug;

/// One label/value pair, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub label: String,
    pub value: String,
}

impl StatEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A single way of locating a stats block in a parsed page.
pub trait StatsStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Entries found by this strategy, or an empty vec if it doesn't apply.
    fn extract(&self, document: &Html) -> Vec<StatEntry>;
}

/// Ordered strategy list. The default order is table, then grid.
pub struct StatsExtractor {
    strategies: Vec<Box<dyn StatsStrategy>>,
}

impl Default for StatsExtractor {
    fn default() -> Self {
        Self::new(vec![Box::new(TableStrategy), Box::new(GridStrategy)])
    }
}

impl StatsExtractor {
    pub fn new(strategies: Vec<Box<dyn StatsStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn extract(&self, html: &str) -> Vec<StatEntry> {
        let document = Html::parse_document(html);

        for strategy in &self.strategies {
            let entries = strategy.extract(&document);
            if !entries.is_empty() {
                debug!("{} strategy extracted {} stats", strategy.name(), entries.len());
                return entries;
            }
        }

        debug!("No stats block recognized");
        Vec::new()
    }
}

/// Extract stats with the default strategy order.
pub fn extract_stats(html: &str) -> Vec<StatEntry> {
    StatsExtractor::default().extract(html)
}

/// Element text with runs of whitespace collapsed to single spaces.
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, Vec<StatEntry>);

    impl StatsStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.0
        }

        fn extract(&self, _document: &Html) -> Vec<StatEntry> {
            self.1.clone()
        }
    }

    #[test]
    fn test_first_non_empty_strategy_wins() {
        let extractor = StatsExtractor::new(vec![
            Box::new(Fixed("empty", vec![])),
            Box::new(Fixed("first", vec![StatEntry::new("OPR", "1")])),
            Box::new(Fixed("second", vec![StatEntry::new("OPR", "2")])),
        ]);

        assert_eq!(extractor.extract("<p></p>"), vec![StatEntry::new("OPR", "1")]);
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let document = Html::parse_fragment("<p>  Total\n   NP <b>OPR</b> </p>");
        let selector = scraper::Selector::parse("p").unwrap();
        let p = document.select(&selector).next().unwrap();
        assert_eq!(element_text(&p), "Total NP OPR");
    }
}
