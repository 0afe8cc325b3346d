pub mod insights;
pub mod profiles;
