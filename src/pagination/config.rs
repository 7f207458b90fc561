use std::ops::Range;

/// Configuration for paginated scraping
///
/// Pages are numbered from 1 and the bound is exclusive, so a limit of 60
/// visits pages 1 through 59. There is no early stop on empty pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub limit: usize,
}

impl PaginationConfig {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn pages(&self) -> Range<usize> {
        1..self.limit.max(1)
    }

    pub fn page_count(&self) -> usize {
        self.pages().len()
    }
}
