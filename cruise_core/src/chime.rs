//! Edge-triggered cluster chime.
//!
//! Engage plays one pulse. Disengage plays a pulse, waits a silent gap, then
//! plays a second pulse; with `mute` set a disengage arms nothing.

use crate::config::ChimeCfg;

/// Tone codes understood by the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChimeTone {
    Engage,
    Disengage,
}

impl ChimeTone {
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            ChimeTone::Engage => 4,
            ChimeTone::Disengage => 7,
        }
    }
}

/// Which counter is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChimePhase {
    Idle,
    Sounding,
    Gap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChimeState {
    /// Last tone code sent to the cluster (0 until the first edge).
    pub chime_val: u8,
    pub chime_timer: u32,
    pub gap_timer: u32,
}

impl ChimeState {
    /// The gap only counts once the tone has finished.
    pub fn phase(&self) -> ChimePhase {
        if self.chime_timer > 0 {
            ChimePhase::Sounding
        } else if self.gap_timer > 0 {
            ChimePhase::Gap
        } else {
            ChimePhase::Idle
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChimeInputs {
    pub enabled: bool,
    pub enabled_prev: bool,
    pub mute: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ChimeController {
    cfg: ChimeCfg,
}

impl ChimeController {
    pub fn new(cfg: ChimeCfg) -> Self {
        Self { cfg }
    }

    /// Advance one tick. The flag is true when a tone tick was consumed,
    /// i.e. the cluster should be sounding during this tick.
    pub fn step(&self, state: ChimeState, input: &ChimeInputs) -> (ChimeState, bool) {
        let mut next = state;
        if !input.enabled_prev && input.enabled {
            next.chime_val = ChimeTone::Engage.code();
            next.chime_timer = self.cfg.chime_ticks;
            next.gap_timer = 0;
            tracing::debug!("engage chime armed");
        } else if input.enabled_prev && !input.enabled && !input.mute {
            next.chime_val = ChimeTone::Disengage.code();
            next.chime_timer = self.cfg.chime_ticks;
            next.gap_timer = self.cfg.gap_ticks;
            tracing::debug!("disengage chime armed");
        }

        let sounding = match next.phase() {
            ChimePhase::Sounding => {
                next.chime_timer -= 1;
                true
            }
            ChimePhase::Gap => {
                next.gap_timer -= 1;
                if next.gap_timer == 0 {
                    next.chime_timer = self.cfg.chime_ticks;
                }
                false
            }
            ChimePhase::Idle => false,
        };
        (next, sounding)
    }
}

/// Positional form of [`ChimeController::step`] with stock timing.
///
/// Returns `(chime_val, chime_timer, gap_timer)`.
pub fn cluster_chime(
    chime_val: u8,
    enabled: bool,
    enabled_prev: bool,
    chime_timer: u32,
    gap_timer: u32,
    mute: bool,
) -> (u8, u32, u32) {
    let (next, _) = ChimeController::default().step(
        ChimeState {
            chime_val,
            chime_timer,
            gap_timer,
        },
        &ChimeInputs {
            enabled,
            enabled_prev,
            mute,
        },
    );
    (next.chime_val, next.chime_timer, next.gap_timer)
}
