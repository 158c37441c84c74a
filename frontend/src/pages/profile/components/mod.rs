pub mod avatar;
pub mod form;
