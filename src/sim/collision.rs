//! Vehicle-vs-pickup collision detection
//!
//! A plain linear scan: the world holds a handful of pickups, so there is no
//! broad phase. Inert pickups are never tested.

use super::aabb::Aabb;
use super::state::Pickup;

/// Indices of live pickups whose box intersects `vehicle_box`, in list order
pub fn detect(vehicle_box: &Aabb, pickups: &[Pickup]) -> Vec<usize> {
    pickups
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.inert)
        .filter(|(_, p)| vehicle_box.intersects(&p.world_bounds()))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn pickup_at(id: u32, x: f32) -> Pickup {
        let bounds = Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        Pickup::new(id, 0, Vec3::new(x, 0.5, 0.0), 1.0, bounds)
    }

    #[test]
    fn test_detects_all_hits_in_list_order() {
        let vehicle_box = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let pickups = vec![pickup_at(1, 1.2), pickup_at(2, 10.0), pickup_at(3, -1.2), pickup_at(4, 0.0)];

        assert_eq!(detect(&vehicle_box, &pickups), vec![0, 2, 3]);
    }

    #[test]
    fn test_inert_pickups_are_skipped() {
        let vehicle_box = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let mut pickups = vec![pickup_at(1, 0.0), pickup_at(2, 0.5)];
        pickups[0].inert = true;

        // Still geometrically overlapping, but never reported again
        assert_eq!(detect(&vehicle_box, &pickups), vec![1]);
    }

    #[test]
    fn test_empty_world() {
        let vehicle_box = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(detect(&vehicle_box, &[]).is_empty());
    }
}
