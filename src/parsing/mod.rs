mod ranking_rows;

pub use ranking_rows::{RANKING_ROW_CELLS, RowParser, parse_cells};
