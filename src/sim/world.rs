//! Static obstacle field
//!
//! Built once per session from the session RNG: 50 trees and 20 buildings
//! scattered by rejection sampling, each reduced to a bounding circle so the
//! collision scan never cares which kind it is looking at. Trees are stored
//! before buildings; the linear scan order doubles as the collision
//! priority order.

use glam::Vec2;
use rand::Rng;

/// Trees placed per session
pub const TREE_COUNT: usize = 50;
/// Buildings placed per session
pub const BUILDING_COUNT: usize = 20;
/// Trees scatter over [-extent, extent] on both axes
pub const TREE_FIELD_EXTENT: f32 = 90.0;
/// Buildings scatter over a slightly smaller square
pub const BUILDING_FIELD_EXTENT: f32 = 80.0;
/// Minimum tree distance from the spawn point at the origin
pub const TREE_SPAWN_CLEARANCE: f32 = 10.0;
/// Minimum building distance from the spawn point
pub const BUILDING_SPAWN_CLEARANCE: f32 = 20.0;
/// Collision radius of a tree trunk
pub const TREE_RADIUS: f32 = 0.6;
/// Building footprints span [min, max) on each side
pub const BUILDING_FOOTPRINT_MIN: f32 = 5.0;
pub const BUILDING_FOOTPRINT_MAX: f32 = 15.0;
/// Floor for the derived building radius; keeps the overlap threshold
/// positive no matter the footprint
pub const MIN_BUILDING_RADIUS: f32 = 0.5;

/// Trimmed off the footprint half-diagonal so glancing corner passes don't
/// register as hits
const BUILDING_RADIUS_TRIM: f32 = 1.0;

/// Rejection-sampling retry cap per obstacle; acceptance is ~99% so this is
/// effectively unreachable
const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

/// Obstacle variants; only the radius derivation differs between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Tree,
    Building,
}

/// A static obstacle reduced to a collision circle on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub center: Vec2,
    pub radius: f32,
}

/// Generate the session's obstacle field from a seeded RNG.
///
/// Trees first, then buildings. Every obstacle is drawn uniformly in its
/// square region and redrawn until it clears the spawn exclusion zone.
pub fn build_environment<R: Rng>(rng: &mut R) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(TREE_COUNT + BUILDING_COUNT);

    for _ in 0..TREE_COUNT {
        let center = sample_clear_position(rng, TREE_FIELD_EXTENT, TREE_SPAWN_CLEARANCE);
        obstacles.push(Obstacle {
            kind: ObstacleKind::Tree,
            center,
            radius: TREE_RADIUS,
        });
    }

    for _ in 0..BUILDING_COUNT {
        let center = sample_clear_position(rng, BUILDING_FIELD_EXTENT, BUILDING_SPAWN_CLEARANCE);
        let width = rng.random_range(BUILDING_FOOTPRINT_MIN..BUILDING_FOOTPRINT_MAX);
        let depth = rng.random_range(BUILDING_FOOTPRINT_MIN..BUILDING_FOOTPRINT_MAX);
        obstacles.push(Obstacle {
            kind: ObstacleKind::Building,
            center,
            radius: building_radius(width, depth),
        });
    }

    log::info!(
        "environment built: {} trees, {} buildings",
        TREE_COUNT,
        BUILDING_COUNT
    );

    obstacles
}

/// Uniform position in [-extent, extent]^2, rejecting the exclusion disc
/// around the origin.
fn sample_clear_position<R: Rng>(rng: &mut R, extent: f32, clearance: f32) -> Vec2 {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = Vec2::new(
            rng.random_range(-extent..extent),
            rng.random_range(-extent..extent),
        );
        if candidate.length() > clearance {
            return candidate;
        }
    }
    // Degenerate fallback: park it just outside the exclusion zone
    let theta = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::new(theta.cos(), theta.sin()) * (clearance + 1.0)
}

/// Collision radius from a building footprint: the base half-diagonal minus
/// a trim constant, floored so it can never go non-positive.
fn building_radius(width: f32, depth: f32) -> f32 {
    let half_diagonal = ((width / 2.0).powi(2) + (depth / 2.0).powi(2)).sqrt();
    (half_diagonal - BUILDING_RADIUS_TRIM).max(MIN_BUILDING_RADIUS)
}
