pub mod classify;
pub mod dialog;
pub mod flow;
pub mod gateway;
pub mod history;
pub mod platform;
pub mod request;
pub mod status;

// Re-export key types for easier usage
pub use classify::*;
pub use dialog::*;
pub use flow::*;
pub use gateway::*;
pub use history::*;
pub use platform::*;
pub use request::*;
pub use status::*;
