// g_phys.rs — think scheduling

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

use crate::dispatch::call_think;
use crate::g_local::GameContext;

/// Runs thinking code for this frame if necessary.
///
/// Returns `true` when the entity had nothing due and `false` once its
/// think has run.
pub fn sv_run_think(ctx: &mut GameContext, ent_idx: usize) -> bool {
    let thinktime = ctx.edicts[ent_idx].nextthink;
    if thinktime <= 0.0 {
        return true;
    }
    if thinktime > ctx.level.time + 0.001 {
        return true;
    }

    ctx.edicts[ent_idx].nextthink = 0.0;
    if ctx.edicts[ent_idx].think_fn.is_none() {
        ctx.gi.error("NULL ent->think");
    }
    call_think(ctx, ent_idx);

    false
}
