//! Application services.

pub mod poll_loop;
