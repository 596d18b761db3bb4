// dispatch.rs — Callback dispatch for entity think/use/touch hooks
//
// Entity callbacks are stored as `Option<usize>` indices into tables held by
// the game context. Entity kinds register their functions once at init and
// keep the returned index. Indices are Copy, so an edict can name its hook
// without borrowing the table, and a hook can take `&mut GameCtx`.

use crate::g_local::{CPlane, CSurface, GameCtx};

// ============================================================
// Type aliases for callback signatures
// ============================================================

pub type ThinkFn = fn(self_idx: usize, ctx: &mut GameCtx);
pub type UseFn = fn(self_idx: usize, other_idx: usize, activator_idx: Option<usize>, ctx: &mut GameCtx);
pub type TouchFn = fn(
    self_idx: usize,
    other_idx: usize,
    ctx: &mut GameCtx,
    plane: Option<&CPlane>,
    surf: Option<&CSurface>,
);

// ============================================================
// Built-in think callbacks
// ============================================================

/// Deferred `use_targets` carried by a "DelayedUse" entity.
pub const THINK_DELAY: usize = 0;
/// Remove the entity when its think fires.
pub const THINK_FREE_EDICT: usize = 1;

fn think_free_edict(self_idx: usize, ctx: &mut GameCtx) {
    crate::g_utils::g_free_edict(ctx, self_idx);
}

// ============================================================
// Tables
// ============================================================

#[derive(Clone)]
pub struct Callbacks {
    think: Vec<ThinkFn>,
    use_fns: Vec<UseFn>,
    touch: Vec<TouchFn>,
}

impl Default for Callbacks {
    fn default() -> Self {
        let mut table = Self {
            think: Vec::new(),
            use_fns: Vec::new(),
            touch: Vec::new(),
        };
        let delay = table.register_think(crate::g_utils::think_delay);
        let free = table.register_think(think_free_edict);
        debug_assert_eq!((delay, free), (THINK_DELAY, THINK_FREE_EDICT));
        table
    }
}

impl Callbacks {
    pub fn register_think(&mut self, f: ThinkFn) -> usize {
        self.think.push(f);
        self.think.len() - 1
    }

    pub fn register_use(&mut self, f: UseFn) -> usize {
        self.use_fns.push(f);
        self.use_fns.len() - 1
    }

    pub fn register_touch(&mut self, f: TouchFn) -> usize {
        self.touch.push(f);
        self.touch.len() - 1
    }

    pub fn think(&self, idx: usize) -> Option<ThinkFn> {
        self.think.get(idx).copied()
    }

    pub fn use_fn(&self, idx: usize) -> Option<UseFn> {
        self.use_fns.get(idx).copied()
    }

    pub fn touch(&self, idx: usize) -> Option<TouchFn> {
        self.touch.get(idx).copied()
    }
}

// ============================================================
// Edict-level dispatch
// ============================================================

/// Call the think_fn on an edict if set.
pub fn call_think(ctx: &mut GameCtx, self_idx: usize) {
    let Some(idx) = ctx.edicts[self_idx].think_fn else {
        return;
    };
    match ctx.callbacks.think(idx) {
        Some(f) => f(self_idx, ctx),
        None => ctx.gi.dprintf(&format!("bad think index {} on entity {}\n", idx, self_idx)),
    }
}

/// Call the use_fn on an edict if set.
pub fn call_use(ctx: &mut GameCtx, self_idx: usize, other_idx: usize, activator_idx: Option<usize>) {
    let Some(idx) = ctx.edicts[self_idx].use_fn else {
        return;
    };
    match ctx.callbacks.use_fn(idx) {
        Some(f) => f(self_idx, other_idx, activator_idx, ctx),
        None => ctx.gi.dprintf(&format!("bad use index {} on entity {}\n", idx, self_idx)),
    }
}

/// Call the touch_fn on an edict if set.
pub fn call_touch(
    ctx: &mut GameCtx,
    self_idx: usize,
    other_idx: usize,
    plane: Option<&CPlane>,
    surf: Option<&CSurface>,
) {
    let Some(idx) = ctx.edicts[self_idx].touch_fn else {
        return;
    };
    match ctx.callbacks.touch(idx) {
        Some(f) => f(self_idx, other_idx, ctx, plane, surf),
        None => ctx.gi.dprintf(&format!("bad touch index {} on entity {}\n", idx, self_idx)),
    }
}
