#![allow(dead_code, unused_imports)]

pub use surfigures_test_utils::{builders, init_tracing, logs, reporter, stub};
