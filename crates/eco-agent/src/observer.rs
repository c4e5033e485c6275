//! Observation-phase collaborator.

use eco_core::Month;
use eco_world::WorldSnapshot;

/// Callbacks run by the watcher during the observation phase.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The observer lives on the watcher's
/// thread for the whole run and is handed back to the caller afterwards, so
/// it may hold writers, counters, or buffers.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl Observer for Progress {
///     fn on_month(&mut self, snapshot: &WorldSnapshot) {
///         println!("{}: {:?}", snapshot.month(), snapshot.values());
///     }
/// }
/// ```
pub trait Observer: Send + 'static {
    /// Called once per tick with every commit of that tick applied, before
    /// the month counter advances.
    fn on_month(&mut self, _snapshot: &WorldSnapshot) {}

    /// Called once after the last tick.
    fn on_sim_end(&mut self, _final_month: Month) {}
}

/// An [`Observer`] that does nothing.
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Drive two observers from one watcher.
impl<A: Observer, B: Observer> Observer for (A, B) {
    fn on_month(&mut self, snapshot: &WorldSnapshot) {
        self.0.on_month(snapshot);
        self.1.on_month(snapshot);
    }

    fn on_sim_end(&mut self, final_month: Month) {
        self.0.on_sim_end(final_month);
        self.1.on_sim_end(final_month);
    }
}

/// An observer that may be switched off, e.g. CSV output without `--out`.
impl<O: Observer> Observer for Option<O> {
    fn on_month(&mut self, snapshot: &WorldSnapshot) {
        if let Some(o) = self {
            o.on_month(snapshot);
        }
    }

    fn on_sim_end(&mut self, final_month: Month) {
        if let Some(o) = self {
            o.on_sim_end(final_month);
        }
    }
}
