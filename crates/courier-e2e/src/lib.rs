//! End-to-end test suite for courier.
//!
//! The tests in `tests/` spawn real `courier-server` processes on free ports
//! and drive them through the SDK and the CLI binary. Build the workspace
//! before running them so the binaries exist under `target/debug`.
