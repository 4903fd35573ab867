pub mod activity;
pub mod classify;
pub mod coach;
pub mod config;
pub mod curriculum;
pub mod hold;
pub mod landmark;
pub mod session;
pub mod stillness;
pub mod strength;
