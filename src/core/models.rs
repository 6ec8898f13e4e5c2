pub mod payload;
pub mod question;
