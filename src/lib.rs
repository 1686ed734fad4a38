pub mod config;
pub mod cookies;
pub mod errors;
pub mod host;
pub mod markup;
pub mod overlay;
pub mod settings;
pub mod storage;

pub use errors::MenuError;
pub use overlay::*;
