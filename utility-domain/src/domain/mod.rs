pub mod period;
pub mod reading;

pub use period::{Dataset, Period, Selection};
pub use reading::{Reading, ReadingDate, Utility};
