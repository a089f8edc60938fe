//! Data-driven game balance
//!
//! Every number the simulation uses lives in [`Tuning`]. The different
//! flavours of the game (gap sizes, hitbox forgiveness, ramp shape) are
//! expressed as [`Preset`]s rather than hard-coded constants.

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a tuning table
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    /// The JSON document could not be parsed into a tuning table.
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value that must be strictly positive was zero or negative.
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    /// The gap plus its margins is taller than the playable area.
    #[error("gap of {gap_height} with {gap_margin} margins does not fit above a floor at {floor_y}")]
    GapDoesNotFit {
        gap_height: f32,
        gap_margin: f32,
        floor_y: f32,
    },

    /// The speed cap is below the starting speed.
    #[error("max_speed {max_speed} is below base_speed {base_speed}")]
    SpeedCap { base_speed: f32, max_speed: f32 },

    /// The spawn interval floor is above the starting interval.
    #[error("min_spawn_interval {min} is above base_spawn_interval {base}")]
    IntervalRange { min: u32, base: u32 },
}

/// Shape of the obstacle speed ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeedRamp {
    /// `base + score * increment`
    Linear { increment: f32 },
    /// `base + (score / every) * increment`, rising in discrete steps
    Stepped { every: u32, increment: f32 },
}

/// Named variants of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Pixel-exact hitbox, lethal ceiling, gentle linear ramp
    #[default]
    Classic,
    /// Wider gap, shrunken hitbox, open ceiling, stepped ramp
    Forgiving,
    /// Heavier bird, visible ground strip, steep ramp
    Arcade,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Forgiving => "Forgiving",
            Preset::Arcade => "Arcade",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "forgiving" | "easy" => Some(Preset::Forgiving),
            "arcade" => Some(Preset::Arcade),
            _ => None,
        }
    }

    pub fn tuning(&self) -> Tuning {
        Tuning::from_preset(*self)
    }
}

/// Complete balance table for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Height of the ground strip; the floor line sits this far above the bottom
    pub ground_height: f32,

    // === Actor ===
    /// Horizontal center of the actor (never changes during a run)
    pub actor_x: f32,
    /// Vertical center of the actor after reset
    pub actor_start_y: f32,
    pub actor_width: f32,
    pub actor_height: f32,
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Velocity set by an impulse (negative is up)
    pub jump_velocity: f32,
    /// Rotation set by an impulse (radians, negative tilts nose up)
    pub jump_tilt: f32,
    /// Rotation the actor drifts toward while falling
    pub max_tilt: f32,
    /// Radians per tick of nose-down drift
    pub tilt_rate: f32,
    /// Shrink applied to each side of the actor's collision box
    pub hitbox_margin: f32,
    /// Touching the top edge ends the run (otherwise the actor is clamped)
    pub ceiling_is_lethal: bool,

    // === Obstacles ===
    pub pipe_width: f32,
    pub gap_height: f32,
    /// Minimum distance between the gap and the ceiling/floor
    pub gap_margin: f32,
    /// Pixels per tick at score 0
    pub base_speed: f32,
    pub speed_ramp: SpeedRamp,
    pub max_speed: f32,
    /// Ticks between spawns at score 0
    pub base_spawn_interval: u32,
    /// Cadence shrink per point: `interval = base / (1 + score * increment)`
    pub cadence_increment: f32,
    pub min_spawn_interval: u32,

    // === Particles (cosmetic) ===
    pub jump_burst: u32,
    pub hit_burst: u32,
    /// Life lost per tick
    pub particle_decay: f32,
    /// Downward acceleration per tick
    pub particle_gravity: f32,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_preset(Preset::Classic)
    }
}

impl Tuning {
    /// Build the balance table for a named variant
    pub fn from_preset(preset: Preset) -> Self {
        let classic = Self {
            screen_width: 400.0,
            screen_height: 600.0,
            ground_height: 0.0,

            actor_x: 50.0,
            actor_start_y: 300.0,
            actor_width: 24.0,
            actor_height: 24.0,
            gravity: 0.25,
            jump_velocity: -4.5,
            jump_tilt: -0.5,
            max_tilt: 0.5,
            tilt_rate: 0.05,
            hitbox_margin: 0.0,
            ceiling_is_lethal: true,

            pipe_width: 52.0,
            gap_height: 150.0,
            gap_margin: 50.0,
            base_speed: 2.0,
            speed_ramp: SpeedRamp::Linear { increment: 0.05 },
            max_speed: 4.0,
            base_spawn_interval: 120,
            cadence_increment: 0.02,
            min_spawn_interval: 70,

            jump_burst: 6,
            hit_burst: 18,
            particle_decay: 0.03,
            particle_gravity: 0.1,
            max_particles: 256,
        };

        match preset {
            Preset::Classic => classic,
            Preset::Forgiving => Self {
                gap_height: 170.0,
                hitbox_margin: 4.0,
                ceiling_is_lethal: false,
                speed_ramp: SpeedRamp::Stepped {
                    every: 5,
                    increment: 0.25,
                },
                max_speed: 3.5,
                cadence_increment: 0.01,
                min_spawn_interval: 85,
                ..classic
            },
            Preset::Arcade => Self {
                ground_height: 80.0,
                actor_start_y: 260.0,
                gravity: 0.35,
                jump_velocity: -6.0,
                max_tilt: 1.2,
                tilt_rate: 0.08,
                hitbox_margin: 2.0,
                pipe_width: 60.0,
                gap_height: 140.0,
                gap_margin: 40.0,
                base_speed: 2.5,
                speed_ramp: SpeedRamp::Linear { increment: 0.08 },
                max_speed: 6.0,
                base_spawn_interval: 100,
                cadence_increment: 0.04,
                min_spawn_interval: 55,
                hit_burst: 28,
                ..classic
            },
        }
    }

    /// Parse a (possibly partial) JSON tuning table; missing fields take
    /// Classic values
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// y coordinate of the floor line
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Inclusive range the top of a gap is drawn from
    pub fn gap_band(&self) -> (f32, f32) {
        let min = self.gap_margin;
        let max = self.floor_y() - self.gap_height - self.gap_margin;
        (min, max)
    }

    /// Check that the table describes a playable game
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("base_speed", self.base_speed),
            ("particle_decay", self.particle_decay),
        ];
        for (field, value) in positive {
            // NaN fails this too
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        if self.base_spawn_interval == 0 {
            return Err(TuningError::NonPositive {
                field: "base_spawn_interval",
                value: 0.0,
            });
        }

        let (min, max) = self.gap_band();
        if max < min {
            return Err(TuningError::GapDoesNotFit {
                gap_height: self.gap_height,
                gap_margin: self.gap_margin,
                floor_y: self.floor_y(),
            });
        }

        if self.max_speed < self.base_speed {
            return Err(TuningError::SpeedCap {
                base_speed: self.base_speed,
                max_speed: self.max_speed,
            });
        }

        if self.min_spawn_interval > self.base_spawn_interval {
            return Err(TuningError::IntervalRange {
                min: self.min_spawn_interval,
                base: self.base_spawn_interval,
            });
        }

        Ok(())
    }
}
