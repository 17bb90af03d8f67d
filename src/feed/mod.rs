pub mod models;
pub mod victories;
pub mod wall;

pub use models::{Spark, SparkCategory, SparkTone, Victory, VictoryKind};
pub use victories::RepaymentLog;
pub use wall::Wall;
