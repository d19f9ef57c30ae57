use convection::{Amplitude, Config, Driver, Logger, SchemeKind, SimError};
use tracing::info;

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // c = 0.5 on the reference grid, i.e. a CFL number of 0.5
    let config = Config::<f64>::default();

    let mut amplitude = Amplitude::new();
    let last = Driver::new(config)
        .with_sampling_period(30)
        .with_observer(Logger)
        .with_observer(&mut amplitude)
        .run()?;

    for kind in SchemeKind::ALL {
        let u = last.scheme(kind);
        let front = u.iter().position(|&u| u < 0.5).unwrap_or(u.len());
        info!(
            "{kind}: front at x={:.3}, max|u|={:.4}, growing={}",
            last.coordinates.get(front).copied().unwrap_or(f64::NAN),
            last.max_abs(kind),
            amplitude.strictly_growing(kind),
        );
    }

    Ok(())
}
