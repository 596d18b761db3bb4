#![allow(clippy::float_cmp, clippy::needless_range_loop)]
// Entity core — pool, search, target cascade, trigger touches and frame driver

pub mod dispatch;
pub mod game_import;
pub mod game;
pub mod g_local;
pub mod g_utils;
pub mod g_phys;
pub mod g_main;
