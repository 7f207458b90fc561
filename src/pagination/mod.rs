mod config;
mod urls;

pub use config::PaginationConfig;
pub use urls::{build_page_url, has_placeholders};

/// Coordinates of one leaderboard page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec<'a> {
    pub market: &'a str,
    pub server: &'a str,
    pub page: usize,
}

impl<'a> PageSpec<'a> {
    pub fn new(market: &'a str, server: &'a str, page: usize) -> Self {
        Self {
            market,
            server,
            page,
        }
    }

    pub fn url(&self, template: &str) -> String {
        build_page_url(template, self.server, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_spec_url() {
        let spec = PageSpec::new("EU", "Lumen", 3);
        assert_eq!(spec.url("http://x/SERVER/PAGE"), "http://x/Lumen/3");
    }
}
