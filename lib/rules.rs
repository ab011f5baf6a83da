mod check;
mod validator;

pub use check::*;
pub use validator::*;
