pub mod dataset;
pub mod field;
pub mod record;
pub mod selection;
