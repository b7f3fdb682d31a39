//! Cross-crate integration tests for the Switchyard workspace live in `tests/`.
