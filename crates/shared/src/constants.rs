pub const MAX_SPEED: u32 = 1;
pub const STEP_DT: f64 = 0.1;
pub const AGENT_X: i32 = 10;
pub const AGENT_Y: i32 = 10;
/// Max per-step translational speed
pub const SPEED: u32 = 10;
/// Max angle in degrees the agent can turn in one step
pub const ANGULAR_SPEED: u32 = 90;
/// Min time between steps in seconds
pub const TIME_PER_STEP: f64 = 0.01;
/// Max number of steps per episode
pub const STEPS_PER_EPISODE: u32 = 100;
/// Max possible distance of objects from the agent
pub const MAX_DISTANCE: u32 = 1_000_000;
/// Min distance from an object for the agent to visit it
pub const MIN_DISTANCE: u32 = 1;

/// Physical radius of the roomba, for vacuuming and collisions
pub const ROOMBA_RAD: u32 = 4;

pub const FIXED_SENSORS: [&str; 5] = ["wall bump", "self.x", "self.y", "closest.x", "closest.y"];
pub const N_FIXED_SENSORS: usize = FIXED_SENSORS.len();
pub const S_IN_BLOCK: [&str; 4] = ["x", "y", "present?", "reward"];
pub const N_S_IN_BLOCK: usize = S_IN_BLOCK.len();

pub const XDIM: f32 = 200.0;
pub const YDIM: f32 = 200.0;
pub const HEIGHT: f32 = 20.0;
pub const OFFSET: f32 = -HEIGHT / 2.0;

pub const OBJECT_TYPE_ROOMBA: u32 = 1 << 0;
pub const OBJECT_TYPE_WALLS: u32 = 1 << 1;
pub const OBJECT_TYPE_FLOOR: u32 = 1 << 2;
pub const OBJECT_TYPE_MARKER: u32 = 1 << 3;

/// Margin of error
pub const MOE: u32 = 0;
pub const WAIT_TIME: f64 = 0.1;

/// Speedup handed to the module when running headless (full speed ahead)
pub const HEADLESS_SPEEDUP: f32 = 1.0;

/// Fixed-update rate matching one simulation step per `STEP_DT`
pub const FIXED_TIMESTEP_HZ: f64 = 1.0 / STEP_DT;

pub const OBJECT_TYPES: [u32; 4] = [
    OBJECT_TYPE_ROOMBA,
    OBJECT_TYPE_WALLS,
    OBJECT_TYPE_FLOOR,
    OBJECT_TYPE_MARKER,
];

pub const fn object_types_are_disjoint_bits(tags: &[u32]) -> bool {
    let mut seen = 0u32;
    let mut i = 0;
    while i < tags.len() {
        let tag = tags[i];
        if !tag.is_power_of_two() || seen & tag != 0 {
            return false;
        }
        seen |= tag;
        i += 1;
    }
    true
}

const _: () = assert!(object_types_are_disjoint_bits(&OBJECT_TYPES));
