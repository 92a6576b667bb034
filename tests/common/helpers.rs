use tracon::aircraft::AircraftState;
use tracon::control::{ModeController, RecordingSink};
use tracon::environment::Airspace;
use tracon::navigation::RouteProvider;
use tracon::simulation::{update_aircraft, UpdateContext};
use tracon::utils::errors::SimError;

/// Route `log` output through the test harness
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Run one full simulation tick
pub fn tick<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &mut R,
    mcp: &mut ModeController,
    airspace: &Airspace,
    dt: f64,
    elapsed: f64,
    sink: &mut RecordingSink,
) -> Result<(), SimError> {
    let ctx = UpdateContext::new(airspace, dt, elapsed);

    update_aircraft(aircraft, route, mcp, &ctx, sink)
}

/// Run `count` ticks of `dt` seconds each, starting at sim time `start`
pub fn run_ticks<R: RouteProvider>(
    aircraft: &mut AircraftState,
    route: &mut R,
    mcp: &mut ModeController,
    airspace: &Airspace,
    dt: f64,
    start: f64,
    count: usize,
    sink: &mut RecordingSink,
) {
    for step in 0..count {
        let elapsed = start + dt * step as f64;
        let _ = tick(aircraft, route, mcp, airspace, dt, elapsed, sink);
    }
}
