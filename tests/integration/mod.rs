//! Integration tests that drive the full router in memory.

mod api;
