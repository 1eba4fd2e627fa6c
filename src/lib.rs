pub mod app;
pub mod config;
pub mod db;
pub mod observability;
pub mod preferences;
pub mod repository;
pub mod usecase;
pub mod viewmodel;

pub use app::App;
pub use db::create_pool;
