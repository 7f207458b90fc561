use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::errors::ScrapeError;

/// Class shared by the summary table and the detail ranking table
pub const RANKING_TABLE_CLASS: &str = "rangkingTable";

/// The detail table is the second `rangkingTable` on the page
pub const RANKING_TABLE_INDEX: usize = 1;

/// How the ranking table is found inside a leaderboard page
pub trait ExtractionStrategy {
    fn name(&self) -> String;

    fn locate<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>, ScrapeError>;
}

/// Picks the n-th (0-based) element carrying a class
pub struct NthByClass {
    class: String,
    index: usize,
    selector: Selector,
}

impl NthByClass {
    pub fn new(class: &str, index: usize) -> Result<Self, ScrapeError> {
        let css = format!(".{}", class);
        let selector = Selector::parse(&css).map_err(|e| ScrapeError::Selector {
            selector: css.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            class: class.to_string(),
            index,
            selector,
        })
    }

    pub fn ranking_table() -> Result<Self, ScrapeError> {
        Self::new(RANKING_TABLE_CLASS, RANKING_TABLE_INDEX)
    }
}

impl ExtractionStrategy for NthByClass {
    fn name(&self) -> String {
        format!("element #{} with class '{}'", self.index + 1, self.class)
    }

    fn locate<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>, ScrapeError> {
        let matches: Vec<ElementRef<'a>> = document.select(&self.selector).collect();
        debug!("Found {} '{}' elements", matches.len(), self.class);

        matches
            .get(self.index)
            .copied()
            .ok_or_else(|| ScrapeError::Locate {
                strategy: self.name(),
                wanted: self.index + 1,
                found: matches.len(),
            })
    }
}

/// Finds the ranking table in a fetched page using a swappable strategy
pub struct TableLocator {
    strategy: Box<dyn ExtractionStrategy>,
}

impl TableLocator {
    pub fn new(strategy: Box<dyn ExtractionStrategy>) -> Self {
        Self { strategy }
    }

    pub fn ranking_table() -> Result<Self, ScrapeError> {
        Ok(Self::new(Box::new(NthByClass::ranking_table()?)))
    }

    pub fn strategy_name(&self) -> String {
        self.strategy.name()
    }

    pub fn locate<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>, ScrapeError> {
        self.strategy.locate(document)
    }
}
