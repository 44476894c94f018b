pub mod config;
pub mod crypt;
pub mod misc;
