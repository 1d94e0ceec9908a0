pub mod autotile;
pub mod catalog;
pub mod collision;
pub mod config;
