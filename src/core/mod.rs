pub mod aggregator;
pub mod catalogue;
pub mod engine;
pub mod session;
pub mod store;

pub use crate::domain::model::{Category, ChecklistItem, ItemId, StatusEntry, StatusValue, UserProfile};
pub use crate::domain::ports::{ConfigProvider, Exporter, Storage};
pub use crate::utils::error::Result;
