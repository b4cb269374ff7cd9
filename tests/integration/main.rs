mod common;

mod admin;
mod recipes;
mod upload_scan;
