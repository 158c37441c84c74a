pub mod guard;
pub mod layout;
pub mod navbar;
pub mod sidebar;
pub mod status;
