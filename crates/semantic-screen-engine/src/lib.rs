pub mod editing;
pub mod io;
pub mod models;


// Re-export key types for easier usage
pub use editing::{AppState, Cmd, Effect, Engine, Patch};
pub use io::*;
pub use models::*;
