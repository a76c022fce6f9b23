pub mod dictionary;
pub mod translation_service;
pub mod word_service;
