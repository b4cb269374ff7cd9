pub mod admin;
pub mod auth;
pub mod health;
pub mod recipe;
pub mod scan;
pub mod upload;
