//! Evasive Placement Engine
//!
//! Picks a new top-left corner for the decline target that stays inside the
//! container (minus an edge buffer), keeps out of the lower part of the
//! container, and never overlaps the accept target's exclusion zone.
//!
//! Sampling: the free space is partitioned into up to three zones (left of,
//! right of, above the exclusion zone). Each iteration draws a zone, then x,
//! then y, and keeps the first candidate passing both checks. When no zone
//! exists or the attempt budget runs out, the target goes to the container
//! edge opposite the accept target.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ProposalConfig;
use crate::geometry::{Bounds, Point, Size};
use crate::random::UniformSource;

/// Inputs for one placement, measured at call time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRequest {
    pub container: Bounds,
    pub accept: Bounds,
    pub decline_size: Size,
    pub prior: Option<Point>,
}

/// Result of a placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point,
    /// True when the deterministic edge position was used
    pub fallback: bool,
    /// Sampling iterations consumed (0 when no zone was available)
    pub iterations: u32,
    /// Distance moved from the prior position, 0 when there was none
    pub displacement: f32,
}

/// Range of valid top-left corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateZone {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl CandidateZone {
    fn has_area(&self) -> bool {
        self.max_x - self.min_x > 0.0 && self.max_y - self.min_y > 0.0
    }

    fn sample<R: UniformSource + ?Sized>(&self, rng: &mut R) -> Point {
        let x = self.min_x + rng.next_unit() * (self.max_x - self.min_x);
        let y = self.min_y + rng.next_unit() * (self.max_y - self.min_y);
        Point::new(x, y)
    }
}

/// Geometry derived once per placement
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPlan {
    pub exclusion: Bounds,
    /// Lowest allowed top edge before the container-bottom cap
    pub max_y: f32,
    /// Area the whole decline target must stay inside
    pub usable: Bounds,
    pub zones: Vec<CandidateZone>,
}

impl PlacementPlan {
    pub fn new(request: &PlacementRequest, config: &ProposalConfig) -> Self {
        let padding = config.exclusion_padding;
        let buffer = config.edge_buffer;
        let Size { width: w, height: h } = request.decline_size;
        let cw = request.container.width;
        let ch = request.container.height;

        let exclusion = request.accept.expand(padding);
        let max_y = (exclusion.top() - padding - h).min(ch * config.max_y_fraction);
        let y_max = max_y.min(ch - buffer - h);
        let usable = Bounds::new(0.0, 0.0, cw, ch).inset(buffer);

        let x_max = cw - buffer - w;

        let candidates = [
            // left of the exclusion zone
            CandidateZone {
                min_x: buffer,
                max_x: (exclusion.left() - w).min(x_max),
                min_y: buffer,
                max_y: y_max,
            },
            // right of it
            CandidateZone {
                min_x: exclusion.right().max(buffer),
                max_x: x_max,
                min_y: buffer,
                max_y: y_max,
            },
            // above it
            CandidateZone {
                min_x: buffer,
                max_x: x_max,
                min_y: buffer,
                max_y: y_max.min(exclusion.top() - h),
            },
        ];
        let zones = candidates.into_iter().filter(CandidateZone::has_area).collect();

        Self {
            exclusion,
            max_y,
            usable,
            zones,
        }
    }

    /// Candidate passes when it clears the exclusion zone and fits the
    /// buffered container.
    pub fn accepts(&self, candidate: &Bounds) -> bool {
        !candidate.overlaps(&self.exclusion) && self.usable.contains(candidate)
    }

    /// Deterministic edge spot opposite the accept target.
    pub fn fallback_position(&self, request: &PlacementRequest, config: &ProposalConfig) -> Point {
        let buffer = config.edge_buffer;
        let w = request.decline_size.width;
        let x = if request.accept.center_x() < request.container.width / 2.0 {
            request.container.width - buffer - w
        } else {
            buffer
        };
        let y = request.accept.top().max(buffer).min(self.max_y);
        Point::new(x.max(0.0), y.max(0.0))
    }
}

/// Compute a new decline target position.
///
/// Consumes exactly three draws per sampling iteration (zone, x, y) and none
/// on the fallback path.
pub fn place_decline_target<R: UniformSource + ?Sized>(
    request: &PlacementRequest,
    config: &ProposalConfig,
    rng: &mut R,
) -> Placement {
    let plan = PlacementPlan::new(request, config);

    let mut iterations = 0;
    if !plan.zones.is_empty() {
        for _ in 0..config.attempt_budget {
            iterations += 1;
            let zone = plan.zones[rng.next_index(plan.zones.len())];
            let point = zone.sample(rng);
            let candidate = Bounds::from_parts(point, request.decline_size);
            if plan.accepts(&candidate) {
                let placement = finish(request, point, false, iterations);
                debug!(
                    x = placement.position.x,
                    y = placement.position.y,
                    iterations,
                    zones = plan.zones.len(),
                    "decline target placed"
                );
                return placement;
            }
            trace!(x = point.x, y = point.y, "candidate rejected");
        }
    }

    let point = plan.fallback_position(request, config);
    debug!(
        x = point.x,
        y = point.y,
        iterations,
        zones = plan.zones.len(),
        "decline target placed at fallback"
    );
    finish(request, point, true, iterations)
}

fn finish(request: &PlacementRequest, position: Point, fallback: bool, iterations: u32) -> Placement {
    Placement {
        position,
        fallback,
        iterations,
        displacement: request
            .prior
            .map(|prior| prior.distance(&position))
            .unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;

    fn scenario() -> PlacementRequest {
        PlacementRequest {
            container: Bounds::new(0.0, 0.0, 500.0, 400.0),
            accept: Bounds::new(180.0, 300.0, 140.0, 52.0),
            decline_size: Size::new(120.0, 48.0),
            prior: None,
        }
    }

    #[test]
    fn test_plan_for_reference_layout() {
        let plan = PlacementPlan::new(&scenario(), &ProposalConfig::default());
        assert_eq!(plan.exclusion, Bounds::new(130.0, 250.0, 240.0, 152.0));
        // 250 - 50 - 48 = 152 < 400 * 0.65 = 260
        assert_eq!(plan.max_y, 152.0);
        // left: x in [20, 10] collapses; right: x in [370, 360] collapses
        assert_eq!(plan.zones.len(), 1);
        let above = plan.zones[0];
        assert_eq!(above.min_x, 20.0);
        assert_eq!(above.max_x, 360.0);
        assert_eq!(above.min_y, 20.0);
        assert_eq!(above.max_y, 152.0);
    }

    #[test]
    fn test_scripted_draws_give_exact_position() {
        // zone index draw, then x, then y
        let mut rng = ScriptedSource::new(vec![0.0, 0.5, 0.25]);
        let placement = place_decline_target(&scenario(), &ProposalConfig::default(), &mut rng);
        assert!(!placement.fallback);
        assert_eq!(placement.iterations, 1);
        assert_eq!(placement.position, Point::new(190.0, 53.0));
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_wide_container_has_three_zones() {
        let request = PlacementRequest {
            container: Bounds::new(0.0, 0.0, 900.0, 600.0),
            accept: Bounds::new(380.0, 480.0, 140.0, 52.0),
            decline_size: Size::new(120.0, 48.0),
            prior: None,
        };
        let plan = PlacementPlan::new(&request, &ProposalConfig::default());
        assert_eq!(plan.zones.len(), 3);

        // pick the right-hand zone (index 1 of 3) at its far corner
        let mut rng = ScriptedSource::new(vec![0.5, 0.999, 0.999]);
        let placement = place_decline_target(&request, &ProposalConfig::default(), &mut rng);
        assert!(!placement.fallback);
        assert!(placement.position.x >= plan.exclusion.right());
        let rect = Bounds::from_parts(placement.position, request.decline_size);
        assert!(!rect.overlaps(&plan.exclusion));
        assert!(plan.usable.contains(&rect));
    }

    #[test]
    fn test_result_stays_clear_for_many_seeds() {
        let config = ProposalConfig::default();
        let request = scenario();
        let plan = PlacementPlan::new(&request, &config);
        let mut rng = crate::random::RandSource::seeded(99);
        for _ in 0..500 {
            let p = place_decline_target(&request, &config, &mut rng);
            let rect = Bounds::from_parts(p.position, request.decline_size);
            assert!(!p.fallback);
            assert!(!rect.overlaps(&plan.exclusion));
            assert!(plan.usable.contains(&rect));
            assert!(p.position.y <= plan.max_y);
        }
    }

    #[test]
    fn test_no_zones_uses_fallback_without_draws() {
        let request = PlacementRequest {
            container: Bounds::new(0.0, 0.0, 200.0, 120.0),
            accept: Bounds::new(20.0, 40.0, 140.0, 52.0),
            decline_size: Size::new(120.0, 48.0),
            prior: None,
        };
        let mut rng = ScriptedSource::constant(0.3);
        let placement = place_decline_target(&request, &ProposalConfig::default(), &mut rng);
        assert!(placement.fallback);
        assert_eq!(placement.iterations, 0);
        assert_eq!(rng.draws(), 0);
        // accept center (90) is left of container center (100): go right
        assert_eq!(placement.position.x, 200.0 - 20.0 - 120.0);
    }

    #[test]
    fn test_fallback_side_follows_accept_center() {
        let config = ProposalConfig::default();
        let mut request = PlacementRequest {
            container: Bounds::new(0.0, 0.0, 300.0, 100.0),
            accept: Bounds::new(200.0, 40.0, 80.0, 40.0),
            decline_size: Size::new(70.0, 30.0),
            prior: None,
        };
        let right_side = place_decline_target(&request, &config, &mut ScriptedSource::constant(0.5));
        assert!(right_side.fallback);
        assert_eq!(right_side.position.x, 20.0);

        request.accept.x = 10.0;
        let left_side = place_decline_target(&request, &config, &mut ScriptedSource::constant(0.5));
        assert!(left_side.fallback);
        assert_eq!(left_side.position.x, 300.0 - 20.0 - 70.0);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let request = PlacementRequest {
            container: Bounds::new(0.0, 0.0, 0.0, 0.0),
            accept: Bounds::new(0.0, 0.0, 0.0, 0.0),
            decline_size: Size::new(120.0, 48.0),
            prior: None,
        };
        let config = ProposalConfig::default();
        let a = place_decline_target(&request, &config, &mut ScriptedSource::constant(0.1));
        let b = place_decline_target(&request, &config, &mut ScriptedSource::constant(0.9));
        assert!(a.fallback);
        assert_eq!(a, b);
        assert!(a.position.x >= 0.0 && a.position.y >= 0.0);
    }

    #[test]
    fn test_zones_never_leave_buffered_container() {
        // accept target measured past the container's right edge
        let request = PlacementRequest {
            container: Bounds::new(0.0, 0.0, 150.0, 400.0),
            accept: Bounds::new(300.0, 300.0, 140.0, 52.0),
            decline_size: Size::new(120.0, 48.0),
            prior: None,
        };
        let config = ProposalConfig::default();
        let plan = PlacementPlan::new(&request, &config);
        assert!(plan.zones.is_empty());

        let mut rng = ScriptedSource::constant(0.5);
        let placement = place_decline_target(&request, &config, &mut rng);
        assert!(placement.fallback);
        assert_eq!(placement.iterations, 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_clipped_left_zone_lands_first_try() {
        let request = PlacementRequest {
            container: Bounds::new(0.0, 0.0, 300.0, 400.0),
            accept: Bounds::new(400.0, 300.0, 140.0, 52.0),
            decline_size: Size::new(120.0, 48.0),
            prior: None,
        };
        let config = ProposalConfig::default();
        let plan = PlacementPlan::new(&request, &config);
        for zone in &plan.zones {
            assert!(zone.min_x >= 20.0);
            assert!(zone.max_x <= 300.0 - 20.0 - 120.0);
        }

        let mut rng = ScriptedSource::constant(0.999);
        let placement = place_decline_target(&request, &config, &mut rng);
        assert!(!placement.fallback);
        assert_eq!(placement.iterations, 1);
        let rect = Bounds::from_parts(placement.position, request.decline_size);
        assert!(plan.usable.contains(&rect));
    }

    #[test]
    fn test_displacement_from_prior() {
        let request = PlacementRequest {
            prior: Some(Point::new(190.0, 0.0)),
            ..scenario()
        };
        let mut rng = ScriptedSource::new(vec![0.0, 0.5, 0.25]);
        let placement = place_decline_target(&request, &ProposalConfig::default(), &mut rng);
        assert!((placement.displacement - 53.0).abs() < 1e-4);
    }

    #[test]
    fn test_max_y_fraction_caps_tall_containers() {
        let request = PlacementRequest {
            container: Bounds::new(0.0, 0.0, 500.0, 1000.0),
            accept: Bounds::new(180.0, 900.0, 140.0, 52.0),
            decline_size: Size::new(120.0, 48.0),
            prior: None,
        };
        let plan = PlacementPlan::new(&request, &ProposalConfig::default());
        // 850 - 50 - 48 = 752 vs 1000 * 0.65 = 650
        assert!((plan.max_y - 650.0).abs() < 1e-3);
        for zone in &plan.zones {
            assert!(zone.max_y <= plan.max_y);
        }
    }
}
