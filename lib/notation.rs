mod record;
mod scoresheet;
mod source;
mod token;

pub use record::*;
pub use scoresheet::*;
pub use source::*;
pub use token::*;
