//! Input loading for résumé, profile and profession documents
//! Handles file detection, document decoding and input caching

pub mod decoder;
pub mod file_detector;
pub mod manager;

pub use manager::InputManager;
