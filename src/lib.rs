//! Purpose: Shared core library crate used by the `uvbridge` CLI and tests.
//! Exports: `core` (install discovery, library binding, errors).
//! Role: Internal library backing the binary; not a stable public SDK.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod core;
