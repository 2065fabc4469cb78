pub mod config;
pub mod db;
pub mod model;
pub mod season;
pub mod seed;
pub mod sim;
