pub mod dictionary;
pub mod word;
