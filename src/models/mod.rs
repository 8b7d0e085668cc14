pub mod chat;
pub mod product;
