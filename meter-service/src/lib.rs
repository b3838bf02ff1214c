pub mod api;
pub mod config;
pub mod metrics_server;
pub mod observability;
pub mod store;
pub mod validate;

pub use api::AppState;
pub use store::{ReadingStore, StoreError};
