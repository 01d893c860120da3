pub mod period_queries;

pub use period_queries::{daily_series, period_summaries, select, PeriodSummary, QueryError, SeriesPoint};
