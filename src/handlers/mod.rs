pub mod activities;
pub mod auth;
pub mod health;
pub mod platform;
pub mod profile;
pub mod users;
