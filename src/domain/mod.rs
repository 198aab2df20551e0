pub mod article;
pub mod diagnostics;
pub mod tags;
