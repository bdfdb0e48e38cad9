pub mod action;
pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod theme;

pub use app::App;
