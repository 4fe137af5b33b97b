pub mod control;
pub mod master;
pub mod structs;
pub mod sweeper;
pub mod worker;

pub use master::Master;
pub use structs::AppState;
pub use worker::routing::{route, Route, ALLOWED_METHODS};
