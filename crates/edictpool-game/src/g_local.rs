// g_local.rs — entity record, level state and the game context

pub use edictpool_common::q_shared::*;
pub use crate::game::{ServerFlags, Solid, SVF_MONSTER};

use crate::dispatch::Callbacks;
use crate::game_import::GameImport;

pub const FRAMETIME: f32 = 0.1;

// ============================================================
// Errors
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Every slot up to the fixed capacity is occupied or was freed too
    /// recently to be handed out again.
    #[error("ED_Alloc: no free edicts (max_edicts {max_edicts})")]
    NoFreeEdicts { max_edicts: usize },
}

// ============================================================
// Game / level state
// ============================================================

/// Game state that persists across levels.
#[derive(Debug, Clone, Default)]
pub struct GameLocals {
    pub maxclients: i32,
    pub maxentities: i32,
}

/// Level state (cleared on each map change).
#[derive(Debug, Clone, Default)]
pub struct LevelLocals {
    pub framenum: i32,
    pub time: f32,
    pub current_entity: Option<usize>,
}

// ============================================================
// Edict
// ============================================================

/// Full edict structure.
#[derive(Debug, Clone, Default)]
pub struct Edict {
    // Server-visible fields
    pub s: EntityState,
    pub client: Option<usize>, // client number, None if not a player
    pub inuse: bool,
    pub svflags: ServerFlags,
    pub absmin: Vec3,
    pub absmax: Vec3,
    pub solid: Solid,

    // Game-private fields
    /// Bumped every time the slot is handed out by the allocator, so a
    /// handle plus serial tells a live entity from a recycled slot.
    pub serial: u32,
    pub freetime: f32,
    pub message: String,
    pub classname: String,
    pub target: String,
    pub targetname: String,
    pub killtarget: String,
    pub team: String,
    pub pathtarget: String,
    pub deathtarget: String,
    pub combattarget: String,

    pub movedir: Vec3,
    pub gravity: f32,

    pub nextthink: f32,
    // Function callbacks — stored as indices into dispatch tables
    pub think_fn: Option<usize>,
    pub touch_fn: Option<usize>,
    pub use_fn: Option<usize>,

    pub health: i32,
    pub activator: Option<usize>,

    pub noise_index: i32,
    pub delay: f32,
}

/// Names a string field of [`Edict`] for [`crate::g_utils::g_find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdictField {
    Classname,
    Targetname,
    Target,
    Killtarget,
    Team,
    Pathtarget,
    Deathtarget,
    Combattarget,
}

impl EdictField {
    /// Read the selected field. An empty string means "not set".
    pub fn get(self, e: &Edict) -> &str {
        match self {
            EdictField::Classname => &e.classname,
            EdictField::Targetname => &e.targetname,
            EdictField::Target => &e.target,
            EdictField::Killtarget => &e.killtarget,
            EdictField::Team => &e.team,
            EdictField::Pathtarget => &e.pathtarget,
            EdictField::Deathtarget => &e.deathtarget,
            EdictField::Combattarget => &e.combattarget,
        }
    }
}

// ============================================================
// Game Context
// ============================================================

/// Holds the edict pool and everything the entity core needs to drive it.
///
/// `edicts` is sized to `max_edicts` once and never reallocated; only
/// `num_edicts` (the high-water mark) moves.
pub struct GameCtx {
    pub edicts: Vec<Edict>,
    pub game: GameLocals,
    pub level: LevelLocals,

    pub num_edicts: usize,
    pub max_edicts: usize,
    pub spawn_serial: u32,

    pub callbacks: Callbacks,
    pub gi: Box<dyn GameImport>,
}

/// Convenience alias so every game module can refer to the context as `GameContext`.
pub type GameContext = GameCtx;

impl GameCtx {
    /// Build a context with a fixed pool of `max_edicts` slots. Slot 0 is
    /// the world and `1..=maxclients` belong to clients; those reserved
    /// slots count as allocated from the start.
    pub fn new(gi: Box<dyn GameImport>, maxclients: usize, max_edicts: usize) -> Self {
        let max_edicts = max_edicts.max(maxclients + 1);
        Self {
            edicts: vec![Edict::default(); max_edicts],
            game: GameLocals {
                maxclients: maxclients as i32,
                maxentities: max_edicts as i32,
            },
            level: LevelLocals::default(),
            num_edicts: maxclients + 1,
            max_edicts,
            spawn_serial: 0,
            callbacks: Callbacks::default(),
            gi,
        }
    }

    /// Highest index that is never returned to the free pool.
    #[inline]
    pub fn maxclients(&self) -> usize {
        self.game.maxclients as usize
    }

    /// True if `idx` names an occupied slot.
    pub fn is_inuse(&self, idx: usize) -> bool {
        self.edicts.get(idx).is_some_and(|e| e.inuse)
    }

    /// True if `idx` is occupied by the same entity that had `serial` when
    /// the caller looked at it.
    pub fn is_alive(&self, idx: usize, serial: u32) -> bool {
        self.edicts.get(idx).is_some_and(|e| e.inuse && e.serial == serial)
    }
}

// ============================================================
// Test support
// ============================================================
