pub mod articles;
pub mod diag;
pub mod health;
pub mod tags;
