// g_main.rs — game initialization and frame logic

/*
Copyright (C) 1997-2001 Id Software, Inc.

This program is free software; you can redistribute it and/or
modify it under the terms of the GNU General Public License
as published by the Free Software Foundation; either version 2
of the License, or (at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program; if not, write to the Free Software
Foundation, Inc., 59 Temple Place - Suite 330, Boston, MA  02111-1307, USA.
*/

use crate::g_local::*;
use crate::g_phys::sv_run_think;
use crate::g_utils::g_init_edict;
use crate::game_import::GameImport;
use edictpool_common::common::LOG_TARGET;

// ============================================================
// InitGame
// ============================================================

/// Called once when the game is loaded. Reads the latched configuration
/// and builds the pool with every slot allocated up front.
pub fn init_game(gi: Box<dyn GameImport>) -> GameContext {
    gi.dprintf("==== InitGame ====\n");

    gi.cvar("developer", "0", CVAR_ZERO);
    let maxclients = gi.cvar("maxclients", "4", CVAR_SERVERINFO | CVAR_LATCH);
    let maxentities = gi.cvar("maxentities", "1024", CVAR_LATCH);

    let maxclients = (maxclients.max(0.0) as usize).clamp(1, MAX_CLIENTS);
    let maxentities = (maxentities.max(0.0) as usize).clamp(maxclients + 2, MAX_EDICTS);

    tracing::debug!(target: LOG_TARGET, maxclients, maxentities, "init game");

    let mut ctx = GameCtx::new(gi, maxclients, maxentities);

    // the world
    g_init_edict(&mut ctx, 0);
    ctx.edicts[0].classname = "worldspawn".to_string();
    ctx.edicts[0].solid = Solid::Bsp;

    // client slots stay free until a player connects
    for i in 1..=maxclients {
        ctx.edicts[i].client = Some(i - 1);
        ctx.edicts[i].s.number = i as i32;
    }

    ctx
}

// ============================================================
// RunFrame
// ============================================================

/// Advances the world by one server frame.
pub fn g_run_frame(ctx: &mut GameContext) {
    ctx.level.framenum += 1;
    ctx.level.time = ctx.level.framenum as f32 * FRAMETIME;

    //
    // treat each object in turn
    // even the world gets a chance to think
    //
    // num_edicts is read every pass: entities spawned by a think this frame
    // also get their turn
    let mut i = 0;
    while i < ctx.num_edicts {
        if ctx.edicts[i].inuse {
            ctx.level.current_entity = Some(i);
            sv_run_think(ctx, i);
        }
        i += 1;
    }

    ctx.level.current_entity = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::THINK_FREE_EDICT;
    use crate::g_local::test_support::*;
    use crate::g_utils::{g_find, g_spawn, g_use_targets, try_spawn};

    fn init_with(cvars: &[(&str, f32)]) -> (GameContext, std::rc::Rc<std::cell::RefCell<TestLog>>) {
        let gi = TestImport::default();
        let log = gi.log.clone();
        log.borrow_mut()
            .cvars
            .extend(cvars.iter().map(|&(name, v)| (name.to_string(), v)));
        (init_game(Box::new(gi)), log)
    }

    #[test]
    fn test_init_game_defaults() {
        let (ctx, log) = init_with(&[]);
        assert_eq!(ctx.maxclients(), 4);
        assert_eq!(ctx.max_edicts, 1024);
        assert_eq!(ctx.edicts.len(), 1024);
        assert_eq!(ctx.num_edicts, 5);
        assert!(ctx.edicts[0].inuse);
        assert_eq!(ctx.edicts[0].classname, "worldspawn");
        assert_eq!(ctx.edicts[0].solid, Solid::Bsp);
        assert_eq!(ctx.edicts[3].client, Some(2));
        assert!(!ctx.edicts[3].inuse);
        assert!(log.borrow().has_dprint("InitGame"));
    }

    #[test]
    fn test_init_game_clamps_configuration() {
        let (ctx, _log) = init_with(&[("maxclients", 8.0), ("maxentities", 3.0)]);
        assert_eq!(ctx.maxclients(), 8);
        assert_eq!(ctx.max_edicts, 10);

        let (ctx, _log) = init_with(&[("maxclients", 0.0), ("maxentities", 99999.0)]);
        assert_eq!(ctx.maxclients(), 1);
        assert_eq!(ctx.max_edicts, MAX_EDICTS);
    }

    #[test]
    fn test_init_game_headless_reads_cvar_store() {
        use crate::game_import::StubGameImport;
        use edictpool_common::cvar;

        cvar::cvar_init();
        cvar::cvar_get("maxentities", "64", CVAR_LATCH);

        let mut ctx = init_game(Box::new(StubGameImport));
        assert_eq!(ctx.maxclients(), 4);
        assert_eq!(ctx.max_edicts, 64);
        assert_eq!(cvar::cvar_variable_string("maxclients"), "4");

        let e = g_spawn(&mut ctx);
        assert_eq!(e, 5);
        g_run_frame(&mut ctx);
        cvar::cvar_shutdown();
    }

    #[test]
    fn test_run_frame_advances_time() {
        let (mut ctx, _log) = make_ctx(8);
        g_run_frame(&mut ctx);
        g_run_frame(&mut ctx);
        assert_eq!(ctx.level.framenum, 2);
        assert!((ctx.level.time - 0.2).abs() < 1e-6);
        assert_eq!(ctx.level.current_entity, None);
    }

    #[test]
    fn test_run_frame_frees_expiring_entity() {
        let (mut ctx, _log) = make_ctx(8);
        let e = g_spawn(&mut ctx);
        ctx.edicts[e].think_fn = Some(THINK_FREE_EDICT);
        ctx.edicts[e].nextthink = 0.3;

        g_run_frame(&mut ctx);
        g_run_frame(&mut ctx);
        assert!(ctx.edicts[e].inuse);
        g_run_frame(&mut ctx);
        assert!(!ctx.edicts[e].inuse);
    }

    #[test]
    fn test_delayed_use_fires_on_time() {
        let (mut ctx, log) = make_ctx(16);
        let (use_rec, ..) = register_all(&mut ctx);
        let relay = g_spawn(&mut ctx);
        ctx.edicts[relay].delay = 5.0;
        ctx.edicts[relay].target = "x".into();
        let x = spawn_named(&mut ctx, "x");
        ctx.edicts[x].use_fn = Some(use_rec);

        g_use_targets(&mut ctx, relay, Some(1));
        let carrier = g_find(&ctx, None, EdictField::Classname, Some("DelayedUse")).expect("carrier");

        for _ in 0..49 {
            g_run_frame(&mut ctx);
        }
        assert!(!log.borrow().has_dprint("use "));
        assert!(ctx.edicts[carrier].inuse);

        g_run_frame(&mut ctx);
        // the carrier fires as the original activator, then removes itself
        assert!(log.borrow().has_dprint(&format!("use {} {} Some(1)", x, carrier)));
        assert_eq!(log.borrow().count_dprint("use "), 1);
        assert!(!ctx.edicts[carrier].inuse);
    }

    fn spawn_child(self_idx: usize, ctx: &mut GameContext) {
        ctx.gi.dprintf(&format!("think {}\n", self_idx));
        let Ok(child) = try_spawn(ctx) else {
            return;
        };
        ctx.edicts[child].classname = "child".into();
        ctx.edicts[child].think_fn = ctx.edicts[self_idx].think_fn;
        ctx.edicts[child].nextthink = ctx.level.time;
    }

    #[test]
    fn test_run_frame_includes_entities_spawned_this_frame() {
        let (mut ctx, log) = make_ctx(8);
        let breeder = ctx.callbacks.register_think(spawn_child);
        let e = g_spawn(&mut ctx);
        ctx.edicts[e].think_fn = Some(breeder);
        ctx.edicts[e].nextthink = 0.1;

        g_run_frame(&mut ctx);

        // each think spawns the next until the pool is full
        assert!(log.borrow().has_dprint(&format!("think {}", e + 1)));
        assert!(log.borrow().has_dprint("think 7"));
        assert_eq!(ctx.num_edicts, 8);
    }
}
