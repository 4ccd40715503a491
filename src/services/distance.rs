use crate::models::place::Coordinate;

pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance in miles, rounded to one decimal place.
/// `None` when either end is unknown or not a finite number. Ranges are not checked.
pub fn distance_miles(a: Option<Coordinate>, b: Option<Coordinate>) -> Option<f64> {
    let (a, b) = (a?, b?);
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    Some(round_tenth(haversine_miles(a, b)))
}

pub fn distance_label(a: Option<Coordinate>, b: Option<Coordinate>) -> Option<String> {
    distance_miles(a, b).map(|miles| format!("{:.1} miles", miles))
}

fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_MILES * c
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
