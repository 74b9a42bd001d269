//! Folder-listing contracts: entry/column types, the host service trait and path helpers.

pub mod path;
pub mod service;
pub mod types;
