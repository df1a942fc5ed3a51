//! Top-headlines reader: fetches a page of headlines from a news API, keeps
//! the last successful fetch for offline use, and stores bookmarks locally.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod sources;
pub mod storage;
