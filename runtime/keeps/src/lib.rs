pub mod directory;
pub mod types;

pub use directory::KeepDirectory;
pub use types::*;
