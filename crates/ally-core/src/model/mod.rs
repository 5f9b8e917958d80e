mod ai;
mod journal;
mod mood;
mod user;

pub use ai::*;
pub use journal::*;
pub use mood::*;
pub use user::*;
