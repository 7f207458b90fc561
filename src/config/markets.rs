/// A group of game servers sharing one leaderboard URL template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    pub name: String,
    pub servers: Vec<String>,
    /// Page URL with literal `SERVER` and `PAGE` placeholders
    pub url_template: String,
}

impl MarketConfig {
    pub fn new(name: &str, servers: Vec<String>, url_template: &str) -> Self {
        Self {
            name: name.to_string(),
            servers,
            url_template: url_template.to_string(),
        }
    }

    /// Name of the INI section describing this market
    pub fn section_name(market: &str) -> String {
        format!("url-{}", market)
    }
}
