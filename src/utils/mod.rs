pub mod emails;
pub mod notify;
