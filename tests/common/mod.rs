#![allow(dead_code, unused_imports)]

pub use mcpman_test_utils::builders;
pub use mcpman_test_utils::fake_backend;
pub use mcpman_test_utils::{init_tracing, with_timeout};
