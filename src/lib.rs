//! Workspace-level integration tests for the Artifact Registry.
//!
//! The tests live under `tests/`; this crate has no code of its own.
