pub mod export;
pub mod keywords;
