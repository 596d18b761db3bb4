#![allow(clippy::needless_range_loop, clippy::float_cmp)]

pub mod q_shared;
pub mod common;
pub mod cvar;
