// Shared animation tuning constants used by the engine and both frontends.
//
// Per-frame factors are expressed for a 60 Hz frame and rescaled by elapsed
// time, so they are exact at 60 fps.

/// Frame rate the per-frame factors below are tuned for.
pub const REFERENCE_FPS: f32 = 60.0;

// Geometry
pub const ROUGH_SUBDIVISIONS: u32 = 2; // icosphere levels for the "rough" look
pub const SMOOTH_SUBDIVISIONS: u32 = 4; // icosphere levels for the "smooth" look
pub const DEGENERATE_LENGTH: f32 = 1e-6; // below this a vertex has no direction

// Ambient displacement
pub const NOISE_FREQUENCY: f32 = 1.5;
pub const NOISE_AMPLITUDE: f32 = 0.12;
pub const NOISE_TIME_SPEED: f32 = 1.0;
pub const NOISE_AXIS_TIME_RATES: [f32; 3] = [0.8, 0.6, 0.7]; // decorrelates the three axes
pub const NOISE_SEED: u32 = 7;

// Impact response
pub const IMPACT_DECAY_PER_FRAME: f32 = 0.92;
pub const IMPACT_FREQUENCY_DROP: f32 = 0.4; // frequency *= 1 - drop * impact
pub const IMPACT_AMPLITUDE_GAIN: f32 = 1.0; // amplitude *= 1 + gain * impact
pub const RIPPLE_MAX: f32 = 0.06; // peak ripple displacement at impact 1.0
pub const RIPPLE_WAVENUMBER: f32 = 9.0; // radians per unit of direction.y
pub const RIPPLE_SPEED: f32 = 14.0; // radians per second

// Springs
pub const SPRING_MAX_STEP_SEC: f32 = 1.0 / 240.0; // integration sub-step
pub const SPRING_MAX_FRAME_SEC: f32 = 0.1; // longer frames are clamped
pub const SPRING_SETTLE_EPSILON: f32 = 0.005;
pub const SPRING_SETTLE_VELOCITY: f32 = 0.01;

pub const BOUNCE_CHANNEL: &str = "bounce_y";
pub const SQUASH_CHANNEL: &str = "squash";

// (target, tension, friction)
pub const BOUNCE_LOOP: [(f32, f32, f32); 2] = [(0.15, 200.0, 10.0), (-0.1, 300.0, 15.0)];
pub const SQUASH_LOOP: [(f32, f32, f32); 3] = [
    (0.92, 250.0, 12.0),
    (1.08, 300.0, 15.0),
    (1.0, 200.0, 20.0),
];
pub const CLICK_SQUASH_FROM: f32 = 0.8;
pub const CLICK_SQUASH_TO: f32 = 1.0;
pub const CLICK_SQUASH_TENSION: f32 = 320.0;
pub const CLICK_SQUASH_FRICTION: f32 = 9.0;

// Gaze schedule (seconds, radians)
pub const GAZE_IDLE_BASE_SEC: f32 = 8.0;
pub const GAZE_IDLE_JITTER_SEC: f32 = 2.0; // uniform +-
pub const GAZE_HOLD_SEC: f32 = 2.0;
pub const GAZE_RETURN_SEC: f32 = 1.5;
pub const GAZE_YAW_MIN: f32 = 0.35;
pub const GAZE_YAW_MAX: f32 = 0.6;
pub const GAZE_PITCH_MAX: f32 = 0.15;

// Orientation smoothing (fraction per reference frame)
pub const BODY_YAW_SMOOTHING: f32 = 0.08;
pub const FACE_YAW_SMOOTHING: f32 = 0.03;
pub const FACE_FOLLOW_SMOOTHING: f32 = 0.05;

// Face idle motion
pub const FACE_ROLL_FREQUENCY: f32 = 1.5;
pub const FACE_ROLL_AMPLITUDE: f32 = 0.02;
pub const FACE_POINTER_FOLLOW: f32 = 0.05;
pub const FACE_BASE_OFFSET: [f32; 3] = [0.0, 0.1, 0.95];

// Expressions
pub const EXPRESSION_INTERVAL_MIN_SEC: f32 = 5.0;
pub const EXPRESSION_INTERVAL_MAX_SEC: f32 = 8.0;
pub const EXPRESSION_OVERRIDE_PROBABILITY: f32 = 0.15;
pub const EXPRESSION_HOLD_MIN_SEC: f32 = 0.15;
pub const EXPRESSION_HOLD_MAX_SEC: f32 = 0.35;

// Blinks
pub const BLINK_INTERVAL_MIN_SEC: f32 = 2.5;
pub const BLINK_INTERVAL_MAX_SEC: f32 = 5.0;
pub const BLINK_PROBABILITY: f32 = 0.7;
pub const BLINK_DURATION_SEC: f32 = 0.12;

// Notification overlay
pub const NOTIFICATION_VISIBLE_LINES: usize = 7;
pub const NOTIFICATION_SEED_LINES: usize = 3;
pub const NOTIFICATION_INTERVAL_SEC: f32 = 0.8;
pub const NOTIFICATION_LINE_HEIGHT: f32 = 0.07;
pub const NOTIFICATION_PADDING: f32 = 0.025;
pub const NOTIFICATION_PANEL_MARGIN: f32 = 0.02; // above and below the text block
pub const NOTIFICATION_PANEL_WIDTH: f32 = 0.65;
pub const NOTIFICATION_SCROLL_DECAY: f32 = 0.95; // per reference frame
pub const NOTIFICATION_FADE_RATE: f32 = 0.1; // opacity lerp per reference frame
pub const NOTIFICATION_SNAP_OPACITY: f32 = 0.05; // hidden opacity snaps to 0 below this
pub const NOTIFICATION_HIDE_OPACITY: f32 = 0.02; // nothing is rendered below this
pub const NOTIFICATION_LINE_MIN_OPACITY: f32 = 0.01;
pub const NOTIFICATION_LINE_ALPHA: f32 = 0.9;

// Sparkles
pub const SPARKLE_COUNT: usize = 12;
pub const SPARKLE_RADIUS: f32 = 1.4;
pub const SPARKLE_RADIUS_JITTER: f32 = 0.4; // total spread around the radius
pub const SPARKLE_LIFE_MIN_SEC: f32 = 2.0;
pub const SPARKLE_LIFE_SPAN_SEC: f32 = 1.5;
pub const SPARKLE_STAGGER_SEC: f32 = 3.0; // initial lives spread over this window
pub const SPARKLE_SPEED_MIN: f32 = 0.08;
pub const SPARKLE_SPEED_SPAN: f32 = 0.06;
pub const SPARKLE_UPWARD_BIAS: f32 = 0.05;
pub const SPARKLE_FADE_IN: f32 = 0.2; // fraction of life
pub const SPARKLE_FADE_OUT_START: f32 = 0.7; // fraction of life
pub const SPARKLE_SPIN_RATE: f32 = 2.0;

// Stage layout and palette
pub const PRIMARY_COLOR: [f32; 3] = [1.0, 0.604, 0.620]; // #ff9a9e
pub const COMPANION_COLORS: [[f32; 3]; 2] = [
    [0.494, 0.722, 0.855], // #7eb8da
    [0.961, 0.651, 0.788], // #f5a6c9
];
pub const COMPANION_POSITIONS: [[f32; 3]; 2] = [[-2.5, -0.8, -1.0], [2.2, 0.5, -0.5]];
pub const COMPANION_SCALES: [f32; 2] = [0.4, 0.35];
pub const MINI_SCALE: f32 = 0.6;
pub const MINI_POSITION: [f32; 3] = [0.0, -0.4, 0.0];
