//! Whole-library scans and folder operations

pub mod config;
pub mod organizer;
pub mod pipeline;
pub mod report;

pub use config::ScanConfig;
pub use organizer::FolderOrganizer;
pub use pipeline::ScanPipeline;
pub use report::{FolderReport, RoleCounts, ScanReport, SongReport};
