pub mod home;
pub mod login;
pub mod profile;
pub mod register;

pub use home::*;
pub use login::*;
pub use profile::*;
pub use register::*;
