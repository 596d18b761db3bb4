// cvar.rs — console variables used to configure the game

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::common::LOG_TARGET;
use crate::q_shared::{CVAR_LATCH, CVAR_NOSET, CVAR_SERVERINFO, CVAR_USERINFO};

/// A console variable.
#[derive(Debug, Clone)]
pub struct Cvar {
    pub name: String,
    pub string: String,
    pub latched_string: Option<String>,
    pub flags: i32,
    pub modified: bool,
    pub value: f32,
}

/// Cvar store. Lookups are O(1) by name.
#[derive(Debug, Default)]
pub struct CvarContext {
    pub cvar_vars: Vec<Cvar>,
    cvar_index: HashMap<String, usize>,
}

impl CvarContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Info strings cannot carry these characters.
    pub fn info_validate(s: &str) -> bool {
        !s.contains('\\') && !s.contains('"') && !s.contains(';')
    }

    pub fn find_var(&self, name: &str) -> Option<&Cvar> {
        self.cvar_index.get(name).map(|&idx| &self.cvar_vars[idx])
    }

    /// Float value of a cvar, 0 if it does not exist.
    pub fn variable_value(&self, name: &str) -> f32 {
        self.find_var(name).map_or(0.0, |var| var.value)
    }

    /// String value of a cvar, "" if it does not exist.
    pub fn variable_string(&self, name: &str) -> &str {
        self.find_var(name).map_or("", |var| var.string.as_str())
    }

    /// Get or create a cvar. An existing cvar keeps its value and only has
    /// `flags` OR'd in.
    pub fn get(&mut self, name: &str, value: &str, flags: i32) -> Option<&Cvar> {
        if flags & (CVAR_USERINFO | CVAR_SERVERINFO) != 0 && !Self::info_validate(name) {
            tracing::warn!(target: LOG_TARGET, "invalid info cvar name {:?}", name);
            return None;
        }

        if let Some(&idx) = self.cvar_index.get(name) {
            self.cvar_vars[idx].flags |= flags;
            return Some(&self.cvar_vars[idx]);
        }

        if flags & (CVAR_USERINFO | CVAR_SERVERINFO) != 0 && !Self::info_validate(value) {
            tracing::warn!(target: LOG_TARGET, "invalid info cvar value {:?}", value);
            return None;
        }

        let idx = self.cvar_vars.len();
        self.cvar_vars.push(Cvar {
            name: name.to_string(),
            string: value.to_string(),
            latched_string: None,
            flags,
            modified: true,
            value: parse_value(value),
        });
        self.cvar_index.insert(name.to_string(), idx);
        Some(&self.cvar_vars[idx])
    }

    /// Set a cvar. Write-protected cvars are left alone; latched cvars hold
    /// the new value until `get_latched_vars` while `game_running` is set.
    pub fn set(&mut self, name: &str, value: &str, game_running: bool) {
        self.set2(name, value, false, game_running);
    }

    /// Set a cvar ignoring NOSET and LATCH.
    pub fn force_set(&mut self, name: &str, value: &str) {
        self.set2(name, value, true, false);
    }

    fn set2(&mut self, name: &str, value: &str, force: bool, game_running: bool) {
        let idx = match self.cvar_index.get(name) {
            Some(&idx) => idx,
            None => {
                self.get(name, value, 0);
                return;
            }
        };
        let var = &mut self.cvar_vars[idx];

        if var.flags & (CVAR_USERINFO | CVAR_SERVERINFO) != 0 && !Self::info_validate(value) {
            tracing::warn!(target: LOG_TARGET, "invalid info cvar value {:?}", value);
            return;
        }

        if !force {
            if var.flags & CVAR_NOSET != 0 {
                tracing::warn!(target: LOG_TARGET, "{} is write protected.", name);
                return;
            }

            if var.flags & CVAR_LATCH != 0 {
                let current = var.latched_string.as_deref().unwrap_or(&var.string);
                if value == current {
                    return;
                }
                if game_running {
                    tracing::info!(target: LOG_TARGET, "{} will be changed for next game.", name);
                    var.latched_string = Some(value.to_string());
                } else {
                    var.string = value.to_string();
                    var.value = parse_value(value);
                    var.modified = true;
                }
                return;
            }
        } else {
            var.latched_string = None;
        }

        if value == var.string {
            return;
        }

        var.modified = true;
        var.string = value.to_string();
        var.value = parse_value(value);
    }

    /// Apply all latched values.
    pub fn get_latched_vars(&mut self) {
        for var in &mut self.cvar_vars {
            if let Some(latched) = var.latched_string.take() {
                var.value = parse_value(&latched);
                var.string = latched;
                var.modified = true;
            }
        }
    }
}

fn parse_value(s: &str) -> f32 {
    s.trim().parse::<f32>().unwrap_or(0.0)
}

// ============================================================
// Global singleton and free-function wrappers
// ============================================================

static CVAR_CTX: Mutex<Option<CvarContext>> = Mutex::new(None);

pub fn cvar_init() {
    *CVAR_CTX.lock() = Some(CvarContext::new());
}

pub fn cvar_shutdown() {
    *CVAR_CTX.lock() = None;
}

/// Get or create a cvar and return its current float value.
/// Returns 0 when the cvar system has not been initialized.
pub fn cvar_get(name: &str, value: &str, flags: i32) -> f32 {
    CVAR_CTX
        .lock()
        .as_mut()
        .and_then(|c| c.get(name, value, flags).map(|v| v.value))
        .unwrap_or(0.0)
}

pub fn cvar_variable_value(name: &str) -> f32 {
    CVAR_CTX.lock().as_ref().map_or(0.0, |c| c.variable_value(name))
}

pub fn cvar_variable_string(name: &str) -> String {
    CVAR_CTX
        .lock()
        .as_ref()
        .map_or(String::new(), |c| c.variable_string(name).to_string())
}
