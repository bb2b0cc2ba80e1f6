//! Integration test harness; cases live in integration/

#[path = "integration/api_tests.rs"]
mod api_tests;
