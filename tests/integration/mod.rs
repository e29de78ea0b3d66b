//! Integration tests for ctr-checkpoint
//!
//! These tests drive the checkpoint command against the file-backed client
//! in a temporary state root and inspect the stored images and task records.

pub mod checkpoint_flow;
pub mod helpers;
pub mod lineage;
