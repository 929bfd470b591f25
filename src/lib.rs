pub mod analysis;
pub mod client;
pub mod config;
pub mod entry;
pub mod http;
pub mod journal;
pub mod session;
pub mod store;
pub mod windows;

pub use analysis::{AnalysisError, AnalysisResult, record_analysis};
pub use client::AnalysisClient;
pub use config::Config;
pub use entry::Entry;
pub use journal::Journal;
pub use session::CaptureSession;
pub use store::JournalStore;
pub use windows::{Window, filter_by_window, filter_by_window_token, total_calories};
