// World geometry (source screen units, y grows downward)
pub const WORLD_WIDTH: f64 = 900.0;
pub const WORLD_HEIGHT: f64 = 250.0;
pub const GROUND_BASELINE: f64 = 220.0; // player's feet rest here
pub const GROUND_STRIP_Y: f64 = 205.0;
pub const PLAYER_ANCHOR_X: f64 = 75.0; // midbottom x of the player
pub const GROUND_OBSTACLE_BOTTOM: f64 = 223.0;
pub const AIRBORNE_OBSTACLE_BOTTOM: f64 = 110.0;

// Player hitbox (walk sprite at 1.5x)
pub const PLAYER_WIDTH: f64 = 66.0;
pub const PLAYER_HEIGHT: f64 = 70.0;

// Physics (per tick)
pub const GRAVITY: f64 = 1.0;
pub const JUMP_VELOCITY: f64 = -17.5;
pub const OBSTACLE_SPEED: f64 = 6.5;
pub const CLOUD_SPEED: f64 = 3.5;
pub const DESPAWN_X: f64 = -100.0;

// Animation
pub const ANIM_STEP: f64 = 0.1;
pub const WALK_FRAMES: usize = 2;
pub const FLAP_FRAMES: usize = 2;

// Spawn band
pub const SPAWN_X_MIN: f64 = 1000.0;
pub const SPAWN_X_MAX: f64 = 1200.0;
pub const CLOUD_Y_MIN: f64 = 50.0;
pub const CLOUD_Y_MAX: f64 = 150.0;

// Timing
pub const TARGET_FPS: u64 = 60;
pub const FRAME_MS: u64 = 1000 / TARGET_FPS;
pub const SCORE_UNIT_MS: u64 = 100; // one point per 100ms survived
pub const DEFAULT_OBSTACLE_INTERVAL_MIN_MS: u64 = 1500;
pub const DEFAULT_OBSTACLE_INTERVAL_MAX_MS: u64 = 2000;
pub const DEFAULT_CLOUD_INTERVAL_MS: u64 = 2000;

// Files under ~/.dino/
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "dino.log";
