use hypersearch_core::{Objective, Observer, Point};
use tracing::{debug, warn};

use super::{Action, Config, Error, Event, Solution, Status, Triple};

/// Recursive golden section search over an explicit [`Triple`].
///
/// Holds everything a step needs so the recursion only threads the bracket
/// and the depth.
pub(super) struct Search<'a, O, S, Obs> {
    objective: &'a mut O,
    config: &'a Config,
    snap: S,
    observer: Obs,
}

impl<'a, O, S, Obs> Search<'a, O, S, Obs>
where
    O: Objective,
    S: Fn(f64) -> f64,
    Obs: Observer<Event, Action>,
{
    pub(super) fn new(objective: &'a mut O, config: &'a Config, snap: S, observer: Obs) -> Self {
        Self {
            objective,
            config,
            snap,
            observer,
        }
    }

    /// Performs one bracketing step and recurses into the surviving sub-bracket.
    pub(super) fn descend(&mut self, triple: Triple, depth: usize) -> Result<Solution, Error<O::Error>> {
        let mid = (self.snap)(triple.mid);
        let (x, side) = triple.probe(mid);
        let x = (self.snap)(x);

        if triple.width() < self.config.tolerance() * (mid.abs() + x.abs()) {
            return Ok(self.finish(Status::Converged, triple.center(), depth));
        }

        if depth >= self.config.max_depth() {
            warn!(
                depth,
                low = triple.low,
                high = triple.high,
                "golden section search reached its depth limit before converging"
            );
            return Ok(self.finish(Status::MaxDepth, triple.center(), depth));
        }

        // Evaluate x first, then mid.
        let loss_x = self.objective.loss(x).map_err(Error::Objective)?;
        let loss_mid = self.objective.loss(mid).map_err(Error::Objective)?;

        let x_point = Point::new(x, loss_x);
        let mid_point = Point::new(mid, loss_mid);
        debug!(
            depth,
            low = triple.low,
            mid,
            high = triple.high,
            x,
            loss_x,
            loss_mid,
            "golden section step"
        );

        let event = Event::Probed {
            depth,
            triple,
            x: x_point,
            mid: mid_point,
        };
        if let Some(Action::StopEarly) = self.observer.observe(&event) {
            let better = if loss_x < loss_mid { x } else { mid };
            return Ok(self.finish(Status::StoppedByObserver, better, depth));
        }

        if loss_x == loss_mid {
            // Integer snapping often lands the probe on mid itself.
            #[allow(clippy::float_cmp)]
            let coincident = x == mid;
            if coincident {
                debug!(x, loss = loss_x, "probe coincides with the middle point");
            } else {
                warn!(
                    x,
                    mid,
                    loss = loss_x,
                    "probe and middle point have identical loss; cannot tell which side holds the minimum"
                );
            }
            let _ = self.observer.observe(&Event::Tie {
                depth,
                x,
                mid,
                loss: loss_x,
            });
            return Ok(self.finish(Status::Tie, 0.5 * (x + mid), depth));
        }

        let next = triple.narrow(mid, x, side, loss_x < loss_mid);
        self.descend(next, depth + 1)
    }

    fn finish(&self, status: Status, x: f64, depth: usize) -> Solution {
        Solution {
            status,
            x: (self.snap)(x),
            depth,
        }
    }
}
