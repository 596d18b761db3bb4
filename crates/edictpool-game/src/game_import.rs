//! Game import interface — services the host engine provides to the game.
//!
//! The context owns one boxed implementation (`ctx.gi`). `StubGameImport`
//! wires the calls that need no server state to the common layer so the
//! game can run headless.

use edictpool_common::common::{com_dprintf, com_error, com_printf};
use edictpool_common::cvar;
use edictpool_common::q_shared::{Vec3, ERR_FATAL};

/// Game import interface — functions provided by the engine to the game module.
pub trait GameImport {
    // Printing
    fn dprintf(&self, msg: &str);
    fn centerprintf(&self, ent_idx: usize, msg: &str);

    // Sound
    fn sound(&self, ent_idx: usize, channel: i32, soundindex: i32, volume: f32, attenuation: f32, timeofs: f32);
    fn soundindex(&self, name: &str) -> i32;

    /// Abort the game. Never returns.
    fn error(&self, msg: &str) -> !;

    // Entity linking
    fn unlinkentity(&self, ent_idx: usize);
    /// Entities whose bounds overlap `mins..maxs` in the `areatype` list,
    /// at most `maxcount` of them.
    fn box_edicts(&self, mins: &Vec3, maxs: &Vec3, maxcount: usize, areatype: i32) -> Vec<usize>;

    // Cvars
    fn cvar(&self, var_name: &str, value: &str, flags: i32) -> f32;

    /// Uniform random source.
    fn random_u32(&self) -> u32 {
        rand::random::<u32>()
    }
}

/// Headless `GameImport`. Printing and cvars go to the common layer;
/// sound, linking and spatial queries are no-ops.
pub struct StubGameImport;

impl GameImport for StubGameImport {
    // ---- Printing ----
    fn dprintf(&self, msg: &str) {
        com_dprintf(msg);
    }
    fn centerprintf(&self, _ent_idx: usize, msg: &str) {
        com_printf(msg);
    }

    // ---- Sound: no audio without a server ----
    fn sound(&self, _ent_idx: usize, _channel: i32, _soundindex: i32, _volume: f32, _attenuation: f32, _timeofs: f32) {}
    fn soundindex(&self, _name: &str) -> i32 {
        0
    }

    fn error(&self, msg: &str) -> ! {
        com_error(ERR_FATAL, msg)
    }

    // ---- Entity linking: no world to link into ----
    fn unlinkentity(&self, _ent_idx: usize) {}
    fn box_edicts(&self, _mins: &Vec3, _maxs: &Vec3, _maxcount: usize, _areatype: i32) -> Vec<usize> {
        Vec::new()
    }

    // ---- Cvars ----
    fn cvar(&self, var_name: &str, value: &str, flags: i32) -> f32 {
        cvar::cvar_get(var_name, value, flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edictpool_common::q_shared::AREA_TRIGGERS;

    #[test]
    fn test_stub_spatial_queries_are_empty() {
        let gi = StubGameImport;
        assert!(gi.box_edicts(&[0.0; 3], &[1.0; 3], 16, AREA_TRIGGERS).is_empty());
        assert_eq!(gi.soundindex("misc/talk1.wav"), 0);
    }

    #[test]
    #[should_panic(expected = "ED_Alloc")]
    fn test_stub_error_is_fatal() {
        StubGameImport.error("ED_Alloc: no free edicts");
    }

    #[test]
    fn test_default_random_source() {
        // Only checks that the default source is callable
        let gi = StubGameImport;
        let _ = gi.random_u32();
    }
}
