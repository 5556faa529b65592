//! Sticking collected pickups onto the vehicle
//!
//! All placement math happens in world orientation, relative to the vehicle
//! position. [`Pickup::attach`] then stores the result in the vehicle's frame
//! so the pickup rides along with later moves and turns.
//!
//! Zero-length directions are never normalized: they collapse to a zero
//! offset instead.

use glam::Vec3;

use super::aabb::Aabb;
use super::state::Pickup;
use super::vehicle::Vehicle;
use crate::normalize_or_zero;
use crate::tuning::AttachmentStrategy;

/// Point on the pickup's box closest to the vehicle box centre
pub fn contact_point(vehicle_box: &Aabb, pickup_box: &Aabb) -> Vec3 {
    pickup_box.clamp_point(vehicle_box.center())
}

/// Sideways push for the surface-side placement.
///
/// The pickup is offset along the vehicle's right vector by the distance
/// from its origin down to the bottom of its box, on the side of the vehicle
/// the contact happened. A contact dead ahead or behind gets no push.
pub fn surface_offset(vehicle: &Vehicle, pickup: &Pickup, pickup_box: &Aabb, contact: Vec3) -> Vec3 {
    let right = vehicle.right();
    let to_contact = normalize_or_zero(contact - vehicle.position);
    let side = to_contact.dot(right);
    let lift = (pickup.position.y - pickup_box.min.y).abs();

    if side > 0.0 {
        right * lift
    } else if side < 0.0 {
        -right * lift
    } else {
        Vec3::ZERO
    }
}

/// Offset from the vehicle position, in world orientation, for a pickup
/// that has just been hit
pub fn placement(vehicle: &Vehicle, pickup: &Pickup, strategy: AttachmentStrategy) -> Vec3 {
    let vehicle_box = vehicle.world_bounds();
    let pickup_box = pickup.world_bounds();

    match strategy {
        AttachmentStrategy::SurfaceSide => surface_placement(vehicle, pickup, &vehicle_box, &pickup_box),
        AttachmentStrategy::OverlapScaled => {
            let base = surface_placement(vehicle, pickup, &vehicle_box, &pickup_box);
            let overlap = vehicle_box.overlap_magnitude(&pickup_box);
            if overlap > 0.0 {
                normalize_or_zero(base) * overlap
            } else {
                base
            }
        }
        AttachmentStrategy::Radial => {
            let direction = normalize_or_zero(pickup_box.center() - vehicle_box.center());
            direction * vehicle_box.half_diagonal()
        }
    }
}

fn surface_placement(vehicle: &Vehicle, pickup: &Pickup, vehicle_box: &Aabb, pickup_box: &Aabb) -> Vec3 {
    let contact = contact_point(vehicle_box, pickup_box);
    (contact - vehicle.position) - surface_offset(vehicle, pickup, pickup_box, contact)
}

/// Mark the pickup inert and bind it to the vehicle
pub fn resolve(vehicle: &Vehicle, pickup: &mut Pickup, strategy: AttachmentStrategy) {
    let offset = placement(vehicle, pickup, strategy);
    pickup.attach(vehicle, offset);
    log::debug!(
        "Pickup {} (level {}) attached at offset {:?}",
        pickup.id,
        pickup.level,
        pickup.local_offset
    );
}
