//! Parking spot domain entity

use crate::domain::VehicleClass;

/// A single parking space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingSpot {
    /// Spot number, starting at 1
    pub id: i32,
    /// Vehicle class this spot accepts
    pub class: VehicleClass,
    /// False while a vehicle holds the spot
    pub available: bool,
}

impl ParkingSpot {
    pub fn new(id: i32, class: VehicleClass) -> Self {
        Self {
            id,
            class,
            available: true,
        }
    }

    /// Spot layout of a fresh lot: cars first, then bikes, numbered from 1.
    pub fn layout(car_spots: u32, bike_spots: u32) -> Vec<ParkingSpot> {
        let cars = std::iter::repeat(VehicleClass::Car).take(car_spots as usize);
        let bikes = std::iter::repeat(VehicleClass::Bike).take(bike_spots as usize);
        cars.chain(bikes)
            .enumerate()
            .map(|(i, class)| ParkingSpot::new(i as i32 + 1, class))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_spot_is_available() {
        let spot = ParkingSpot::new(17, VehicleClass::Car);
        assert!(spot.available);
        assert_eq!(spot.id, 17);
    }

    #[test]
    fn layout_numbers_cars_then_bikes() {
        let spots = ParkingSpot::layout(3, 2);
        let summary: Vec<(i32, VehicleClass)> = spots.iter().map(|s| (s.id, s.class)).collect();
        assert_eq!(
            summary,
            vec![
                (1, VehicleClass::Car),
                (2, VehicleClass::Car),
                (3, VehicleClass::Car),
                (4, VehicleClass::Bike),
                (5, VehicleClass::Bike),
            ]
        );
        assert!(spots.iter().all(|s| s.available));
    }

    #[test]
    fn empty_layout() {
        assert!(ParkingSpot::layout(0, 0).is_empty());
    }
}
