pub mod commands;
pub mod network;
pub mod util;
