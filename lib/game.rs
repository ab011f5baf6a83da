mod controller;
mod observer;
mod options;
mod outcome;
mod state;

pub use controller::*;
pub use observer::*;
pub use options::*;
pub use outcome::*;
pub use state::*;
