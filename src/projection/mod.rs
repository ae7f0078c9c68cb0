//! Projection engine for daily compound growth schedules

mod compound;
mod engine;
mod returns;
mod schedule;

pub use compound::{daily_increase, date_for_day, days_to_target, expected_value};
pub use engine::{build_schedule, statistics, GrowthEngine, MAX_SCHEDULE_DAYS};
pub use returns::{return_rate, total_return_rate};
pub use schedule::{Schedule, ScheduleRow, Statistics};
