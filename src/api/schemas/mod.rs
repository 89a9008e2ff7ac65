pub mod catalog;
pub mod contacts;
pub mod health;
