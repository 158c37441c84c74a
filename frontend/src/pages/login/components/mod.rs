pub mod form;
pub mod google;
pub mod location_prompt;
