//! Property tests for the edict pool.
//!
//! Random sequences of spawn/free/clock operations are replayed against a
//! small pool, checking the allocator and search invariants after each step.

use std::collections::HashMap;

use edictpool_game::g_local::{EdictField, GameCtx, PoolError, Vec3};
use edictpool_game::g_utils::{g_find, g_free_edict, try_spawn};
use edictpool_game::game_import::GameImport;
use proptest::prelude::*;

const MAXCLIENTS: usize = 2;
const MAX_EDICTS: usize = 24;

/// Host with no world: every query is empty and errors abort the test.
struct NullImport;

impl GameImport for NullImport {
    fn dprintf(&self, _msg: &str) {}
    fn centerprintf(&self, _ent_idx: usize, _msg: &str) {}
    fn sound(&self, _ent_idx: usize, _channel: i32, _soundindex: i32, _volume: f32, _attenuation: f32, _timeofs: f32) {}
    fn soundindex(&self, _name: &str) -> i32 {
        0
    }
    fn error(&self, msg: &str) -> ! {
        panic!("{}", msg)
    }
    fn unlinkentity(&self, _ent_idx: usize) {}
    fn box_edicts(&self, _mins: &Vec3, _maxs: &Vec3, _maxcount: usize, _areatype: i32) -> Vec<usize> {
        Vec::new()
    }
    fn cvar(&self, _var_name: &str, value: &str, _flags: i32) -> f32 {
        value.parse().unwrap_or(0.0)
    }
    fn random_u32(&self) -> u32 {
        0
    }
}

fn new_pool() -> GameCtx {
    let mut ctx = GameCtx::new(Box::new(NullImport), MAXCLIENTS, MAX_EDICTS);
    ctx.edicts[0].inuse = true;
    ctx.edicts[0].classname = "worldspawn".to_string();
    ctx
}

#[derive(Debug, Clone)]
enum PoolOp {
    /// Spawn and name the entity after one of a few shared targetnames.
    Spawn(u8),
    /// Free the n-th live entity (modulo the live count).
    Free(usize),
    /// Advance the clock by this many tenths of a second.
    Advance(u8),
}

fn pool_op_strategy() -> impl Strategy<Value = PoolOp> {
    prop_oneof![
        4 => (0u8..3).prop_map(PoolOp::Spawn),
        3 => (0..64usize).prop_map(PoolOp::Free),
        2 => (1u8..10).prop_map(PoolOp::Advance),
    ]
}

fn name(n: u8) -> &'static str {
    ["alpha", "Beta", "gamma"][n as usize % 3]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn pool_ops_preserve_invariants(ops in prop::collection::vec(pool_op_strategy(), 1..80)) {
        let mut ctx = new_pool();
        let mut live: Vec<usize> = Vec::new();
        let mut freed_at: HashMap<usize, f32> = HashMap::new();

        for op in ops {
            let before = ctx.num_edicts;
            match op {
                PoolOp::Spawn(n) => match try_spawn(&mut ctx) {
                    Ok(idx) => {
                        prop_assert!(idx > MAXCLIENTS && idx < MAX_EDICTS);
                        prop_assert!(!live.contains(&idx));
                        if let Some(freetime) = freed_at.remove(&idx) {
                            // reuse only after the recency window, or during the grace period
                            prop_assert!(freetime < 2.0 || ctx.level.time - freetime > 0.5);
                        }
                        prop_assert!(ctx.edicts[idx].inuse);
                        prop_assert_eq!(ctx.edicts[idx].classname.as_str(), "noclass");
                        ctx.edicts[idx].targetname = name(n).to_string();
                        live.push(idx);
                    }
                    Err(PoolError::NoFreeEdicts { max_edicts }) => {
                        prop_assert_eq!(max_edicts, MAX_EDICTS);
                        prop_assert_eq!(ctx.num_edicts, MAX_EDICTS);
                        for (&idx, &freetime) in &freed_at {
                            prop_assert!(freetime >= 2.0 && ctx.level.time - freetime <= 0.5, "slot {} was reusable", idx);
                        }
                    }
                },
                PoolOp::Free(n) => {
                    if !live.is_empty() {
                        let idx = live.remove(n % live.len());
                        g_free_edict(&mut ctx, idx);
                        prop_assert!(!ctx.edicts[idx].inuse);
                        freed_at.insert(idx, ctx.level.time);
                    }
                }
                PoolOp::Advance(tenths) => {
                    ctx.level.time += tenths as f32 * 0.1;
                }
            }

            // the high-water mark never moves down
            prop_assert!(ctx.num_edicts >= before);
            prop_assert!(ctx.num_edicts <= MAX_EDICTS);

            // every matching live entity is found, in pool order, and nothing else
            for n in 0..3u8 {
                let mut expected: Vec<usize> = live
                    .iter()
                    .copied()
                    .filter(|&i| ctx.edicts[i].targetname == name(n))
                    .collect();
                expected.sort_unstable();

                let mut found = Vec::new();
                let mut cursor = None;
                while let Some(idx) = g_find(&ctx, cursor, EdictField::Targetname, Some(&name(n).to_uppercase())) {
                    found.push(idx);
                    cursor = Some(idx);
                }
                prop_assert_eq!(found, expected);
            }
        }
    }
}
