pub mod catalog;
pub mod config;
pub mod error;
pub mod list_ops;
pub mod operation;
pub mod product;
pub mod report;
pub mod series;
pub mod state;
pub mod suggestion;

pub use config::TrendlensConfig;
pub use error::{Result, TrendlensError};
pub use state::ViewState;
