pub mod channel_map;
pub mod difference_equation;
pub mod history;

pub use channel_map::ChannelMap;
pub use difference_equation::{ChannelHistory, Coefficients};
pub use history::HistoryRing;
