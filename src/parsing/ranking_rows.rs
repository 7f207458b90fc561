use log::debug;
use scraper::{ElementRef, Selector};

use crate::domain::RankingRow;
use crate::errors::ScrapeError;

/// Ranking entries have exactly this many cells; anything else is a
/// header, an ad or a malformed row.
pub const RANKING_ROW_CELLS: usize = 7;

const RANK_CELL: usize = 0;
const NAME_CELL: usize = 2;
const CLASS_CELL: usize = 3;
const GUILD_CELL: usize = 4;
const SERVER_CELL: usize = 5;
const LEVEL_CELL: usize = 6;

/// Turns the rows of a ranking table into typed entries
pub struct RowParser {
    row_selector: Selector,
    cell_selector: Selector,
}

impl RowParser {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            row_selector: compile("tr")?,
            cell_selector: compile("td")?,
        })
    }

    /// Parse every 7-cell row of the table, in table order.
    ///
    /// A rank or level that is not an integer fails the whole table.
    pub fn parse(&self, table: ElementRef<'_>) -> Result<Vec<RankingRow>, ScrapeError> {
        let mut rows = Vec::new();
        let mut skipped = 0;

        for (idx, row) in table.select(&self.row_selector).enumerate() {
            let cells = self.cell_texts(row);
            match parse_cells(idx + 1, &cells)? {
                Some(entry) => rows.push(entry),
                None => skipped += 1,
            }
        }

        debug!("Parsed {} ranking rows, skipped {}", rows.len(), skipped);
        Ok(rows)
    }

    fn cell_texts(&self, row: ElementRef<'_>) -> Vec<String> {
        row.select(&self.cell_selector)
            .map(|cell| cell.text().collect::<String>())
            .collect()
    }
}

/// Map the raw cell texts of one row; `None` when the row is not a ranking entry
pub fn parse_cells(row: usize, cells: &[String]) -> Result<Option<RankingRow>, ScrapeError> {
    if cells.len() != RANKING_ROW_CELLS {
        return Ok(None);
    }

    Ok(Some(RankingRow {
        rank: parse_number(row, "rank", &cells[RANK_CELL])?,
        name: cells[NAME_CELL].trim().to_string(),
        class: cells[CLASS_CELL].trim().to_string(),
        guild: cells[GUILD_CELL].trim().to_string(),
        server: strip_whitespace(&cells[SERVER_CELL]),
        level: parse_number(row, "level", &cells[LEVEL_CELL])?,
    }))
}

/// Ranks and levels start at 1; zero is as invalid as text.
fn parse_number(row: usize, field: &'static str, raw: &str) -> Result<u32, ScrapeError> {
    let value = raw.trim();
    value
        .parse::<u32>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(|| ScrapeError::Parse {
            row,
            field,
            value: value.to_string(),
        })
}

/// Server names are stored without any spaces ("Main Server" -> "MainServer")
fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn table_html(rows: &[&[&str]]) -> String {
        let body: String = rows
            .iter()
            .map(|row| {
                let tds: String = row.iter().map(|c| format!("<td>{c}</td>")).collect();
                format!("<tr>{tds}</tr>")
            })
            .collect();
        format!(r#"<table class="rangkingTable">{body}</table>"#)
    }

    fn parse_table(rows: &[&[&str]]) -> Result<Vec<RankingRow>, ScrapeError> {
        let html = Html::parse_document(&table_html(rows));
        let selector = Selector::parse("table").unwrap();
        let table = html.select(&selector).next().unwrap();
        RowParser::new().unwrap().parse(table)
    }

    #[test]
    fn test_parses_seven_cell_rows() {
        let rows = parse_table(&[
            &["1", "", "PlayerA", "Warrior", "GuildX", "Server One", "50"],
            &["2", "", "PlayerB", "Mage", "GuildY", "Server Two", "48"],
        ])
        .unwrap();

        assert_eq!(
            rows,
            vec![
                RankingRow {
                    rank: 1,
                    name: "PlayerA".into(),
                    class: "Warrior".into(),
                    guild: "GuildX".into(),
                    server: "ServerOne".into(),
                    level: 50,
                },
                RankingRow {
                    rank: 2,
                    name: "PlayerB".into(),
                    class: "Mage".into(),
                    guild: "GuildY".into(),
                    server: "ServerTwo".into(),
                    level: 48,
                },
            ]
        );
    }

    #[test]
    fn test_skips_rows_with_other_cell_counts() {
        let rows = parse_table(&[
            &["1", "", "PlayerA", "Warrior", "GuildX", "Server One"],
            &["2", "", "PlayerB", "Mage", "GuildY", "Server Two", "48"],
            &["advertisement"],
            &["3", "", "PlayerC", "Mage", "GuildY", "Server Two", "47", "extra"],
        ])
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "PlayerB");
    }

    #[test]
    fn test_header_row_with_th_cells_is_skipped() {
        let html = Html::parse_document(
            r#"<table>
                <tr><th>Rank</th><th></th><th>Name</th><th>Class</th><th>Guild</th><th>Server</th><th>Level</th></tr>
                <tr><td>1</td><td><img></td><td>A</td><td>B</td><td>C</td><td>D</td><td>9</td></tr>
            </table>"#,
        );
        let selector = Selector::parse("table").unwrap();
        let table = html.select(&selector).next().unwrap();

        let rows = RowParser::new().unwrap().parse(table).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].level, 9);
    }

    #[test]
    fn test_invalid_rank_fails_the_table() {
        let err = parse_table(&[
            &["1", "", "PlayerA", "Warrior", "GuildX", "S", "50"],
            &["abc", "", "PlayerB", "Mage", "GuildY", "S", "48"],
        ])
        .unwrap_err();

        match err {
            ScrapeError::Parse { row, field, value } => {
                assert_eq!(row, 2);
                assert_eq!(field, "rank");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_level_is_parse_error() {
        let result = parse_cells(1, &cells(&["1", "", "A", "B", "C", "D", "fifty"]));
        assert!(matches!(
            result,
            Err(ScrapeError::Parse { field: "level", .. })
        ));
    }

    #[test]
    fn test_zero_rank_or_level_is_parse_error() {
        let zero_rank = parse_cells(4, &cells(&["0", "", "A", "B", "C", "D", "10"]));
        let zero_level = parse_cells(5, &cells(&["3", "", "A", "B", "C", "D", " 0 "]));

        assert!(matches!(
            zero_rank,
            Err(ScrapeError::Parse { row: 4, field: "rank", .. })
        ));
        assert!(matches!(
            zero_level,
            Err(ScrapeError::Parse { row: 5, field: "level", .. })
        ));
    }

    #[test]
    fn test_negative_numbers_are_parse_errors() {
        let result = parse_cells(1, &cells(&["-1", "", "A", "B", "C", "D", "10"]));
        assert!(matches!(result, Err(ScrapeError::Parse { field: "rank", .. })));
    }

    #[test]
    fn test_trims_fields_and_strips_server_spaces() {
        let row = parse_cells(
            1,
            &cells(&[" 12 ", "x", "  Hero ", "\tKnight\n", " The Guild ", " Main  Server ", " 150 "]),
        )
        .unwrap()
        .unwrap();

        assert_eq!(row.rank, 12);
        assert_eq!(row.name, "Hero");
        assert_eq!(row.class, "Knight");
        assert_eq!(row.guild, "The Guild");
        assert_eq!(row.server, "MainServer");
        assert_eq!(row.level, 150);
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let raw = cells(&["3", "", "A", "B", "C", "D E", "7"]);
        assert_eq!(parse_cells(1, &raw).unwrap(), parse_cells(1, &raw).unwrap());
    }

    #[test]
    fn test_nested_markup_in_cells_uses_text() {
        let rows = parse_table(&[&[
            "<b>4</b>",
            "<img src='x.png'>",
            "<a href='/c/1'>Linked</a>",
            "Mage",
            "",
            "Blue Moon",
            "<span>60</span>",
        ]])
        .unwrap();

        assert_eq!(rows[0].rank, 4);
        assert_eq!(rows[0].name, "Linked");
        assert_eq!(rows[0].guild, "");
        assert_eq!(rows[0].server, "BlueMoon");
    }
}
