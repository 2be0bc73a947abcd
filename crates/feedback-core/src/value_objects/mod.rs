//! Value objects - immutable types that represent domain concepts

mod snowflake;
mod timeline;

pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use timeline::{TimeRange, TimelinePosition, WindowRadius};
