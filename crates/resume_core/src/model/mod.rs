//! Resume entity model.
//!
//! # Responsibility
//! - Define the document, its metadata, basics and section entry records.
//! - Provide the closed section enumeration and the empty-entry factory.
//!
//! # Invariants
//! - Model types carry no store behavior; they are plain values shared
//!   through `Arc` between snapshots.
//! - Absent `visible` means shown.

pub mod document;
pub mod entries;
pub mod factory;
pub mod section;
