pub mod jwt;
pub mod push;
