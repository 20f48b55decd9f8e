pub mod cli;
pub mod ui;
mod views;
