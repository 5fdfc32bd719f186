pub mod app_state;
pub mod sessions;

pub use app_state::*;
pub use sessions::*;
