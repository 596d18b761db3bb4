// q_shared.rs — foundational types and math shared by the game and its host

// ============================================================
// Basic types
// ============================================================

pub type Vec3 = [f32; 3];

pub const PITCH: usize = 0; // up / down
pub const YAW: usize = 1; // left / right
pub const ROLL: usize = 2; // fall over

pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;

// ============================================================
// Limits
// ============================================================

pub const MAX_CLIENTS: usize = 256;
pub const MAX_EDICTS: usize = 1024;

// ============================================================
// Error levels
// ============================================================

pub const ERR_FATAL: i32 = 4;
pub const ERR_DROP: i32 = 8;

// ============================================================
// Console variable flags
// ============================================================

pub const CVAR_ZERO: i32 = 0;
pub const CVAR_USERINFO: i32 = 2;
pub const CVAR_SERVERINFO: i32 = 4;
pub const CVAR_NOSET: i32 = 8;
pub const CVAR_LATCH: i32 = 16;

// ============================================================
// Spatial query categories for box_edicts
// ============================================================

pub const AREA_SOLID: i32 = 1;
pub const AREA_TRIGGERS: i32 = 2;

// ============================================================
// Sound
// ============================================================

pub const CHAN_AUTO: i32 = 0;

pub const ATTN_NORM: f32 = 1.0;

// ============================================================
// Collision types handed to touch callbacks
// ============================================================

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CPlane {
    pub normal: Vec3,
    pub dist: f32,
    pub plane_type: u8,
    pub signbits: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CSurface {
    pub name: String,
    pub flags: i32,
    pub value: i32,
}

/// Network-visible part of an entity. Only the fields the entity core
/// touches live here; the rest belongs to the host's delta encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntityState {
    pub number: i32,
    pub origin: Vec3,
    pub angles: Vec3,
}

// ============================================================
// Vector operations
// ============================================================

pub fn vector_compare(v1: &Vec3, v2: &Vec3) -> bool {
    v1[0] == v2[0] && v1[1] == v2[1] && v1[2] == v2[2]
}

// ============================================================
// Angle functions
// ============================================================

pub fn angle_vectors(
    angles: &Vec3,
    forward: Option<&mut Vec3>,
    right: Option<&mut Vec3>,
    up: Option<&mut Vec3>,
) {
    let angle_yaw = angles[YAW].to_radians();
    let sy = angle_yaw.sin();
    let cy = angle_yaw.cos();

    let angle_pitch = angles[PITCH].to_radians();
    let sp = angle_pitch.sin();
    let cp = angle_pitch.cos();

    let angle_roll = angles[ROLL].to_radians();
    let sr = angle_roll.sin();
    let cr = angle_roll.cos();

    if let Some(fwd) = forward {
        fwd[0] = cp * cy;
        fwd[1] = cp * sy;
        fwd[2] = -sp;
    }
    if let Some(r) = right {
        r[0] = -sr * sp * cy + -cr * -sy;
        r[1] = -sr * sp * sy + -cr * cy;
        r[2] = -sr * cp;
    }
    if let Some(u) = up {
        u[0] = cr * sp * cy + -sr * -sy;
        u[1] = cr * sp * sy + -sr * cy;
        u[2] = cr * cp;
    }
}

/// Convert a direction vector to a yaw angle in degrees.
///
/// The x component is read through the `PITCH` slot and y through `YAW`,
/// so an axis-aligned vector on y short-circuits to +/-90. Non-axis results
/// are truncated to whole degrees and wrapped into `[0, 360)`.
pub fn vectoyaw(vec: &Vec3) -> f32 {
    if vec[PITCH] == 0.0 {
        if vec[YAW] > 0.0 {
            90.0
        } else if vec[YAW] < 0.0 {
            -90.0
        } else {
            0.0
        }
    } else {
        let mut yaw = (vec[YAW].atan2(vec[PITCH]) * RAD_TO_DEG) as i32 as f32;
        if yaw < 0.0 {
            yaw += 360.0;
        }
        yaw
    }
}

/// Convert a direction vector to Euler angles, truncating yaw and pitch
/// to whole degrees.
pub fn vectoangles(value1: &Vec3) -> Vec3 {
    let yaw;
    let mut pitch;

    if value1[1] == 0.0 && value1[0] == 0.0 {
        yaw = 0.0;
        pitch = if value1[2] > 0.0 { 90.0 } else { 270.0 };
    } else {
        yaw = if value1[0] != 0.0 {
            (value1[1].atan2(value1[0]) * RAD_TO_DEG) as i32 as f32
        } else if value1[1] > 0.0 {
            90.0
        } else {
            270.0
        };

        let forward = (value1[0] * value1[0] + value1[1] * value1[1]).sqrt();
        pitch = (value1[2].atan2(forward) * RAD_TO_DEG) as i32 as f32;
        if pitch < 0.0 {
            pitch += 360.0;
        }
    }

    [-pitch, if yaw < 0.0 { yaw + 360.0 } else { yaw }, 0.0]
}

// ============================================================
// String helpers
// ============================================================

/// Case-insensitive equality without allocating.
#[inline]
pub fn q_streq(s1: &str, s2: &str) -> bool {
    s1.eq_ignore_ascii_case(s2)
}
