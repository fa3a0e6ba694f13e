pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod ui;
pub mod view;

pub use app::router;
pub use client::CommissionClient;
pub use config::Settings;
pub use state::AppState;
pub use view::CommissionView;
