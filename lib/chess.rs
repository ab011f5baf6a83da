mod board;
mod color;
mod file;
mod piece;
mod rank;
mod role;
mod snapshot;
mod square;

pub use board::*;
pub use color::*;
pub use file::*;
pub use piece::*;
pub use rank::*;
pub use role::*;
pub use snapshot::*;
pub use square::*;
