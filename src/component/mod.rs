//! 功能元件模組
//!
//! 每個子模組實現一個獨立的互動流程

pub mod thumbnail_studio;

pub use thumbnail_studio::ThumbnailStudio;
