pub mod cells;
pub mod datasets;
pub mod radar;
