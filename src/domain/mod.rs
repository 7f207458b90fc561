pub mod models;
pub mod points;
mod progress;

pub use models::*;
pub use points::{assemble_points, snapshot_time, today_snapshot_time};
pub use progress::RunProgress;
