mod general;
mod users;

pub use general::*;
pub use users::*;
