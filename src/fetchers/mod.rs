mod table_locator;

pub use table_locator::{
    ExtractionStrategy, NthByClass, RANKING_TABLE_CLASS, RANKING_TABLE_INDEX, TableLocator,
};
