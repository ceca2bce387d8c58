pub mod json;

pub use json::RelayJson;
