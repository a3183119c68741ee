pub mod client;
pub mod import;
