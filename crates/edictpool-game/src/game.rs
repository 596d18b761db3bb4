// game.rs — entity flags and enums shared with the host

// edict->svflags
bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ServerFlags: i32 {
        /// Treat as CONTENTS_MONSTER for collision.
        const MONSTER = 0x00000004;
    }
}
pub const SVF_MONSTER: ServerFlags = ServerFlags::MONSTER;

// edict->solid values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum Solid {
    #[default]
    Not = 0,
    Trigger,
    Bbox,
    Bsp,
}
