mod contact;
mod errors;
mod health_check;
mod helpers;
mod home;

pub use contact::*;
pub use errors::*;
pub use health_check::*;
pub use helpers::*;
pub use home::*;
