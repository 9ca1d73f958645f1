mod record;
mod validation;

pub use record::{READINGS_PER_GROUP, Record, Section};
pub use validation::is_reading_text;
