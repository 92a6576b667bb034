use std::f64::consts::PI;

// Maneuvering
pub const TURN_RATE: f64 = 0.0523598776; // rad/s (standard rate, ~3 deg/s)
pub const TYPICAL_CLIMB_FACTOR: f64 = 0.7; // fraction of book climb rate flown in normal ops
pub const TYPICAL_DESCENT_FACTOR: f64 = 0.7; // fraction of book descent rate flown in normal ops
pub const DECELERATION_FACTOR_DUE_TO_GROUND_BRAKING: f64 = 3.5;
pub const ACCELERATION_RAMP_NEAR_STALL_FACTOR: f64 = 2.0; // acceleration multiplier at zero speed

// Departure
pub const TAKEOFF_TURN_ALTITUDE: f64 = 400.0; // ft AGL before the autopilot may turn

// Approach geometry
pub const ESTABLISHED_ON_COURSE_MAX_LATERAL_NM: f64 = 0.048; // nm abeam the localizer
pub const ESTABLISHED_ON_COURSE_MAX_ANGLE: f64 = 30.0 * PI / 180.0; // rad off the inbound course
pub const ESTABLISHED_ON_GLIDEPATH_MAX_DELTA: f64 = 100.0; // ft above/below the glideslope
pub const FINAL_APPROACH_FIX_DISTANCE_NM: f64 = 5.0;
pub const LANDING_FINAL_APPROACH_SPEED_DISTANCE_NM: f64 = 1.0; // at/inside this, fly Vref
pub const LANDING_ASSIGNED_SPEED_DISTANCE_NM: f64 = 5.0; // at/outside this, fly assigned speed
pub const MISSED_APPROACH_CLIMB: f64 = 2000.0; // ft above field, rounded up to a thousand

// Localizer interception
pub const LOCALIZER_CAPTURE_WINDOW: f64 = 1.5 * PI / 180.0; // rad either side of the course
pub const LOCALIZER_COURSE_CORRECTION_GAIN: f64 = 20.0; // proportional gain while tracking
pub const LOCALIZER_MINIMUM_INTERCEPT_ANGLE: f64 = 10.0 * PI / 180.0; // rad
pub const LOCALIZER_EARLY_TURN_DISTANCE_NM: f64 = 0.5; // start the turn early, tailwind margin

// Waypoint sequencing
pub const MAXIMUM_DISTANCE_TO_PASS_WAYPOINT_NM: f64 = 0.5;
pub const MAXIMUM_DISTANCE_TO_FLY_BY_WAYPOINT_NM: f64 = 5.0;
pub const TURN_LEAD_TIME: f64 = 2.0; // s of travel added to the turn-anticipation distance

// Holding patterns
pub const HOLD_PAST_FIX_ALONG_TRACK_KM: f64 = 1.0;
pub const HOLD_PAST_FIX_TOTAL_KM: f64 = 2.0;

// Regulatory
pub const MAX_SPEED_BELOW_10K_FEET: f64 = 250.0; // kt IAS
pub const SPEED_RESTRICTION_ALTITUDE: f64 = 10_000.0; // ft MSL

// Climb-rate altitude correction (troposphere model, deg Rankine)
pub const TROPOSPHERE_CEILING: f64 = 36_152.0; // ft
pub const SEA_LEVEL_TEMPERATURE_RANKINE: f64 = 518.6;
pub const TROPOSPHERE_LAPSE_RATE: f64 = 0.003_56; // deg R per ft
pub const ISA_DENSITY_EXPONENT: f64 = 5.256;
pub const CLIMB_RATE_DENSITY_COEFFICIENT: f64 = 1.232;
pub const CLIMB_RATE_SCALE: f64 = 420.7;
pub const SERVICE_CEILING_CLIMB_RATE_JET: f64 = 500.0; // ft/min
pub const SERVICE_CEILING_CLIMB_RATE_PISTON: f64 = 100.0; // ft/min

// Atmosphere
pub const TAS_INCREASE_FACTOR_PER_FOOT: f64 = 0.000_016; // 1.6% per thousand feet
pub const WIND_INCREASE_FACTOR_PER_FOOT: f64 = 0.000_02; // 2.0% per thousand feet

// Post-collision behavior
pub const HIT_FALL_RATE: f64 = 90.0; // ft/s
pub const HIT_SPEED_DECAY: f64 = 0.99; // speed multiplier per tick

// Hazard-scan scheduling
pub const RESTRICTED_AREA_RECHECK_AFTER_ENTRY: f64 = 50.0; // s of flight between checks once inside
pub const RESTRICTED_AREA_MINIMUM_CHECK_INTERVAL: f64 = 10.0; // s of flight between checks
pub const TERRAIN_MINIMUM_CHECK_DISTANCE: f64 = 0.2; // km

// Surface operations
pub const ON_GROUND_ALTITUDE_TOLERANCE: f64 = 5.0; // ft
pub const STOPPED_SPEED: f64 = 5.0; // kt
pub const DEFAULT_TAXI_DURATION: f64 = 3.0; // s from pushback to holding short

// Radar display trail
pub const POSITION_HISTORY_INTERVAL: f64 = 4.0; // s between trail samples at 1x time

// Wind scoring thresholds
pub const EXTREME_CROSSWIND: f64 = 20.0; // kt
pub const HIGH_CROSSWIND: f64 = 10.0; // kt
pub const EXTREME_TAILWIND: f64 = 10.0; // kt
pub const HIGH_TAILWIND: f64 = 1.0; // kt
