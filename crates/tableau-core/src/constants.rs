use glam::Vec3;

// Shared scene, timing and copy constants used by the web frontend.

// Assets
pub const DEFAULT_MODEL_PATH: &str = "/models/TableForOne.glb";
pub const MODEL_EXTENSION: &str = ".glb";
pub const REQUEST_ACCESS_URL: &str = "https://instagram.com/akhi1_s";

// Loader timing (seconds)
pub const DEFAULT_LOAD_DELAY_SEC: f32 = 2.0; // wait before fetching the default model
pub const PLACEHOLDER_DELAY_SEC: f32 = 0.5; // avoids flicker between error text and placeholder

// Camera
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 5.0, 12.0);
pub const CAMERA_START_LOOK: Vec3 = Vec3::new(0.0, 0.5, 0.0);
pub const CAMERA_DOLLY_END: Vec3 = Vec3::new(0.0, 3.5, 8.0);
pub const CAMERA_DOLLY_END_LOOK: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const CAMERA_DOLLY_SEC: f32 = 8.0;

// Idle drift
pub const IDLE_TIME_SCALE: f64 = 0.0005; // radians per wall-clock millisecond
pub const IDLE_SWAY_X: f32 = 0.3;
pub const IDLE_BASE_Y: f32 = 3.5;
pub const IDLE_BOB_Y: f32 = 0.1;
pub const IDLE_BOB_RATE: f32 = 0.7;
pub const IDLE_LOOK: Vec3 = Vec3::new(0.0, 1.0, 0.0);

// Device tilt
pub const TILT_THRESHOLD_DEG: f32 = 20.0;
pub const TILT_PAN_RANGE_DEG: f32 = 45.0;
pub const TILT_CAMERA_GAIN: f32 = 0.01; // world units per degree
pub const TILT_LOOK: Vec3 = Vec3::new(0.0, 2.0, 0.0);

// Environment
pub const FOG_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
pub const FOG_DENSITY: f32 = 0.05;
pub const TONE_EXPOSURE: f32 = 0.8;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Spot shadow map
pub const SHADOW_MAP_SIZE: u32 = 1024;
pub const SHADOW_BIAS: f32 = -0.0001; // added to receiver depth before the compare
pub const SHADOW_NEAR: f32 = 0.5;

// Copy
pub const TEXT_LOADING_MODEL: &str = "Loading 3D model...";
pub const TEXT_LOAD_ERROR: &str = "Error loading model. Creating placeholder...";
pub const TEXT_DROP_REJECTED: &str = "Please drop a .glb file";
pub const TEXT_QUOTE_FIRST: &str = "You weren't invited.";
pub const TEXT_QUOTE_SECOND: &str = "But you still came looking.";
pub const TEXT_REJECTION: &str = "Private list. Try again next lifetime.";
pub const TEXT_EASTER_EGG: &str = "Persistent, aren't you?";
pub const TEXT_SEAT_BUTTON: &str = "Take a Seat";
pub const TEXT_REQUEST_BUTTON: &str = "Request Access";

// Colours used by text effects
pub const COLOR_REJECTION: &str = "#A60000"; // blood red
pub const COLOR_EASTER_EGG: &str = "#FFD700"; // gold
pub const COLOR_DROP_ERROR: &str = "#ff0000";
pub const COLOR_LOADING_TEXT: &str = "rgba(255, 255, 255, 0.6)";

// CSS classes toggled by the script
pub const CLASS_GLITCH: &str = "glitch-active";
pub const CLASS_FLOATING: &str = "floating-text";
pub const CLASS_HEARTBEAT: &str = "heartbeat";
pub const CLASS_MODEL_LOADED: &str = "model-loaded";
pub const CLASS_DROP_HIGHLIGHT: &str = "highlight";
pub const CLASS_DROP_DRAGOVER: &str = "dragover";

// Interaction counters
pub const CLICK_REQUEST_ACCESS: u32 = 1;
pub const CLICK_EASTER_EGG: u32 = 3;
