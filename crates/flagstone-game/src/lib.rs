pub mod config;
pub mod enemy;
pub mod goal;
pub mod hero;
pub mod level;
pub mod menu;
pub mod platform;
pub mod session;
pub mod world;
