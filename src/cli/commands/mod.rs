pub mod alerts;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod export;
pub mod family;
pub mod fefo;
pub mod init;
pub mod log;
pub mod lookup;
pub mod lot;
pub mod movement;
pub mod product;
pub mod seed;
