mod aggregate;
mod builder;
mod channel;
mod config;

pub use aggregate::aggregate;
pub use builder::ReportBuilder;
pub use channel::{CategoryOutcome, ChannelProcessor};
pub use config::ReportConfig;
