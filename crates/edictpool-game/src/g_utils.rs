// g_utils.rs — entity allocation, search, target firing and trigger touches

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

use crate::dispatch::{call_touch, call_use, THINK_DELAY};
use crate::g_local::{
    angle_vectors, q_streq, vector_compare, Edict, EdictField, GameContext, PoolError, Vec3,
    AREA_SOLID, AREA_TRIGGERS, ATTN_NORM, CHAN_AUTO, SVF_MONSTER,
};

use edictpool_common::common::LOG_TARGET;
pub use edictpool_common::q_shared::{vectoangles, vectoyaw};

const MAXCHOICES: usize = 8;

/// Freed slots younger than this are not reused...
const FREE_REUSE_DELAY: f32 = 0.5;
/// ...unless they were freed in the first seconds of the level.
const FREE_GRACE_TIME: f32 = 2.0;

const DEFAULT_MESSAGE_SOUND: &str = "misc/talk1.wav";

/// Projects a point in 3D space using forward and right vectors.
/// Used for weapon muzzle positioning.
pub fn g_project_source(point: &Vec3, distance: &Vec3, forward: &Vec3, right: &Vec3) -> Vec3 {
    [
        point[0] + forward[0] * distance[0] + right[0] * distance[1],
        point[1] + forward[1] * distance[0] + right[1] * distance[1],
        point[2] + forward[2] * distance[0] + right[2] * distance[1] + distance[2],
    ]
}

/// Searches all active entities for the next one whose `field` equals
/// `match_val` (case-insensitive).
///
/// Searching begins at the edict after `from`, or at the beginning when
/// `from` is `None`, so the result can be fed straight back in to walk
/// every match in pool order. Entities with the field unset never match.
pub fn g_find(ctx: &GameContext, from: Option<usize>, field: EdictField, match_val: Option<&str>) -> Option<usize> {
    let match_val = match_val?;
    let start = from.map_or(0, |idx| idx.saturating_add(1));
    let end = ctx.num_edicts.min(ctx.edicts.len());

    (start..end).find(|&i| {
        let e = &ctx.edicts[i];
        if !e.inuse {
            return false;
        }
        let s = field.get(e);
        !s.is_empty() && q_streq(s, match_val)
    })
}

/// Pick a random entity among the first `MAXCHOICES` with a matching
/// targetname. Returns `None` if none match.
pub fn g_pick_target(ctx: &GameContext, targetname: Option<&str>) -> Option<usize> {
    let targetname = match targetname {
        Some(name) if !name.is_empty() => name,
        _ => {
            ctx.gi.dprintf("G_PickTarget called with NULL targetname\n");
            return None;
        }
    };

    let mut choices = [0usize; MAXCHOICES];
    let mut num_choices = 0;
    let mut ent = None;

    while let Some(idx) = g_find(ctx, ent, EdictField::Targetname, Some(targetname)) {
        choices[num_choices] = idx;
        num_choices += 1;
        if num_choices == MAXCHOICES {
            break;
        }
        ent = Some(idx);
    }

    if num_choices == 0 {
        ctx.gi.dprintf(&format!("G_PickTarget: target {} not found\n", targetname));
        return None;
    }

    Some(choices[ctx.gi.random_u32() as usize % num_choices])
}

/// Think function for a "DelayedUse" entity: fire the stored targets on
/// behalf of the original activator, then remove the carrier.
pub fn think_delay(ent_idx: usize, ctx: &mut GameContext) {
    let activator = ctx.edicts[ent_idx].activator;
    if activator.is_none() {
        ctx.gi.dprintf("Think_Delay with no activator\n");
    }
    g_use_targets(ctx, ent_idx, activator);
    g_free_edict(ctx, ent_idx);
}

/// Convert a vector to a string for printing.
pub fn vtos(v: &Vec3) -> String {
    format!("({} {} {})", v[0] as i32, v[1] as i32, v[2] as i32)
}

// Special angle vectors for movement direction
const VEC_UP: Vec3 = [0.0, -1.0, 0.0];
const MOVEDIR_UP: Vec3 = [0.0, 0.0, 1.0];
const VEC_DOWN: Vec3 = [0.0, -2.0, 0.0];
const MOVEDIR_DOWN: Vec3 = [0.0, 0.0, -1.0];

/// Set movement direction from editor angles, then clear the angles.
pub fn g_set_movedir(angles: &mut Vec3, movedir: &mut Vec3) {
    if vector_compare(angles, &VEC_UP) {
        *movedir = MOVEDIR_UP;
    } else if vector_compare(angles, &VEC_DOWN) {
        *movedir = MOVEDIR_DOWN;
    } else {
        angle_vectors(angles, Some(movedir), None, None);
    }

    *angles = [0.0; 3];
}

/// Initialize a freshly handed-out edict.
pub fn g_init_edict(ctx: &mut GameContext, index: usize) {
    ctx.spawn_serial = ctx.spawn_serial.wrapping_add(1);
    let e = &mut ctx.edicts[index];
    e.inuse = true;
    e.classname = "noclass".to_string();
    e.gravity = 1.0;
    e.s.number = index as i32;
    e.serial = ctx.spawn_serial;
}

/// Either finds a free edict, or allocates a new one.
///
/// Try to avoid reusing an entity that was recently freed, because it
/// can cause the client to think the entity morphed into something else
/// instead of being removed and recreated, which can cause interpolated
/// angles and bad trails.
pub fn try_spawn(ctx: &mut GameContext) -> Result<usize, PoolError> {
    let first = ctx.maxclients() + 1;
    let level_time = ctx.level.time;

    let reusable = (first..ctx.num_edicts).find(|&i| {
        let e = &ctx.edicts[i];
        // the first couple seconds of server time can involve a lot of
        // freeing and allocating, so relax the replacement policy
        !e.inuse && (e.freetime < FREE_GRACE_TIME || level_time - e.freetime > FREE_REUSE_DELAY)
    });

    let idx = match reusable {
        Some(idx) => idx,
        None => {
            if ctx.num_edicts >= ctx.max_edicts {
                return Err(PoolError::NoFreeEdicts { max_edicts: ctx.max_edicts });
            }
            ctx.num_edicts += 1;
            ctx.num_edicts - 1
        }
    };

    ctx.edicts[idx] = Edict::default();
    g_init_edict(ctx, idx);
    tracing::trace!(target: LOG_TARGET, idx, num_edicts = ctx.num_edicts, reused = reusable.is_some(), "spawn edict");
    Ok(idx)
}

/// Like [`try_spawn`], but running out of edicts is fatal.
pub fn g_spawn(ctx: &mut GameContext) -> usize {
    match try_spawn(ctx) {
        Ok(idx) => idx,
        Err(err) => ctx.gi.error(&err.to_string()),
    }
}

/// Marks the edict as free. World and client slots are only unlinked.
pub fn g_free_edict(ctx: &mut GameContext, ent_idx: usize) {
    if ent_idx >= ctx.edicts.len() {
        return;
    }

    ctx.gi.unlinkentity(ent_idx);

    if ent_idx <= ctx.maxclients() {
        return;
    }

    let e = &mut ctx.edicts[ent_idx];
    *e = Edict::default();
    e.classname = "freed".to_string();
    e.freetime = ctx.level.time;
    e.inuse = false;
    tracing::trace!(target: LOG_TARGET, idx = ent_idx, time = ctx.level.time, "free edict");
}

/// Fires all targets of an entity.
///
/// If the entity has a delay, a "DelayedUse" entity is created instead and
/// does the firing when its think comes due. Otherwise the entity's message
/// is centerprinted to the activator, every entity named by its killtarget
/// is removed, and every entity named by its target has its use function
/// called with `(target, ent, activator)`.
///
/// Any of those steps may remove `ent` itself; once that happens nothing
/// further is done.
pub fn g_use_targets(ctx: &mut GameContext, ent_idx: usize, activator_idx: Option<usize>) {
    let Some(activator_idx) = activator_idx else {
        return;
    };
    if !ctx.is_inuse(ent_idx) || activator_idx >= ctx.edicts.len() {
        return;
    }

    let (serial, delay, message, target, killtarget, noise_index) = {
        let ent = &ctx.edicts[ent_idx];
        (
            ent.serial,
            ent.delay,
            ent.message.clone(),
            ent.target.clone(),
            ent.killtarget.clone(),
            ent.noise_index,
        )
    };

    // check for a delay
    if delay > 0.0 {
        // create a temp object to fire at a later time
        let t_idx = g_spawn(ctx);
        let nextthink = ctx.level.time + delay;
        let t = &mut ctx.edicts[t_idx];
        t.classname = "DelayedUse".to_string();
        t.nextthink = nextthink;
        t.think_fn = Some(THINK_DELAY);
        t.activator = Some(activator_idx);
        t.message = message;
        t.target = target;
        t.killtarget = killtarget;
        return;
    }

    // print the message
    if !message.is_empty() && !ctx.edicts[activator_idx].svflags.contains(SVF_MONSTER) {
        ctx.gi.centerprintf(activator_idx, &message);

        let soundindex = if noise_index != 0 {
            noise_index
        } else {
            ctx.gi.soundindex(DEFAULT_MESSAGE_SOUND)
        };
        ctx.gi.sound(activator_idx, CHAN_AUTO, soundindex, 1.0, ATTN_NORM, 0.0);
    }

    // kill killtargets
    if !killtarget.is_empty() {
        let mut t = None;
        while let Some(t_idx) = g_find(ctx, t, EdictField::Targetname, Some(&killtarget)) {
            g_free_edict(ctx, t_idx);

            if !ctx.is_alive(ent_idx, serial) {
                ctx.gi.dprintf("entity was removed while using killtargets\n");
                return;
            }
            t = Some(t_idx);
        }
    }

    // fire targets
    if !target.is_empty() {
        let mut t = None;
        while let Some(t_idx) = g_find(ctx, t, EdictField::Targetname, Some(&target)) {
            t = Some(t_idx);

            // doors fire area portals in a specific way
            if q_streq(&ctx.edicts[t_idx].classname, "func_areaportal") && is_door(&ctx.edicts[ent_idx]) {
                continue;
            }

            if t_idx == ent_idx {
                ctx.gi.dprintf("WARNING: Entity used itself.\n");
            } else if ctx.edicts[t_idx].use_fn.is_some() {
                call_use(ctx, t_idx, ent_idx, Some(activator_idx));
            }

            if !ctx.is_alive(ent_idx, serial) {
                ctx.gi.dprintf("entity was removed while using targets\n");
                return;
            }
        }
    }
}

fn is_door(ent: &Edict) -> bool {
    q_streq(&ent.classname, "func_door") || q_streq(&ent.classname, "func_door_rotating")
}

/// Calls the touch function of every trigger the entity's bounds overlap.
pub fn g_touch_triggers(ctx: &mut GameContext, ent_idx: usize) {
    let Some(ent) = ctx.edicts.get(ent_idx) else {
        return;
    };

    // dead things don't activate triggers!
    if (ent.client.is_some() || ent.svflags.contains(SVF_MONSTER)) && ent.health <= 0 {
        return;
    }

    let (absmin, absmax) = (ent.absmin, ent.absmax);

    // The list is owned, so entities freed by an earlier touch stay in it;
    // each one is checked again right before its turn.
    let touch = ctx.gi.box_edicts(&absmin, &absmax, ctx.max_edicts, AREA_TRIGGERS);

    for hit_idx in touch.into_iter().take(ctx.max_edicts) {
        match ctx.edicts.get(hit_idx) {
            Some(hit) if hit.inuse && hit.touch_fn.is_some() => {}
            _ => continue,
        }
        call_touch(ctx, hit_idx, ent_idx, None, None);
    }
}

/// Force all solid entities the trigger covers to touch it immediately.
/// Called after linking a new trigger in during gameplay.
pub fn g_touch_solids(ctx: &mut GameContext, ent_idx: usize) {
    let Some(ent) = ctx.edicts.get(ent_idx) else {
        return;
    };
    let (absmin, absmax, serial) = (ent.absmin, ent.absmax, ent.serial);

    let touch = ctx.gi.box_edicts(&absmin, &absmax, ctx.max_edicts, AREA_SOLID);

    for hit_idx in touch.into_iter().take(ctx.max_edicts) {
        if !ctx.is_inuse(hit_idx) {
            continue;
        }
        if ctx.edicts[ent_idx].touch_fn.is_some() {
            call_touch(ctx, ent_idx, hit_idx, None, None);
        }
        if !ctx.is_alive(ent_idx, serial) {
            break;
        }
    }
}

/// Kills all entities that would touch the proposed new positioning of ent.
///
/// Telefragging is not implemented: nothing is cleared and the result is
/// always `false`.
pub fn killbox(_ctx: &mut GameContext, _ent_idx: usize) -> bool {
    false
}
