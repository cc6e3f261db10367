use serde::{Deserialize, Serialize};

/// One of the eight 45° sectors of the wind rose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    const ROSE: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl std::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a wind direction in degrees into a compass point.
///
/// Sectors are centred on each point, so 22.4° is still `N` and 22.5° is `NE`.
/// Unknown or non-finite input is `None`, never a default of north.
pub fn to_compass_point(deg: Option<f64>) -> Option<CompassPoint> {
    let deg = deg.filter(|d| d.is_finite())?;
    let ix = (deg / 45.0).round().rem_euclid(8.0) as usize;
    Some(CompassPoint::ROSE[ix])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_points() {
        assert_eq!(to_compass_point(Some(0.0)), Some(CompassPoint::N));
        assert_eq!(to_compass_point(Some(90.0)), Some(CompassPoint::E));
        assert_eq!(to_compass_point(Some(180.0)), Some(CompassPoint::S));
        assert_eq!(to_compass_point(Some(270.0)), Some(CompassPoint::W));
    }

    #[test]
    fn near_full_circle_wraps_to_north() {
        assert_eq!(to_compass_point(Some(359.0)), Some(CompassPoint::N));
        assert_eq!(to_compass_point(Some(359.999)), Some(CompassPoint::N));
        assert_eq!(to_compass_point(Some(340.0)), Some(CompassPoint::N));
        assert_eq!(to_compass_point(Some(337.0)), Some(CompassPoint::NW));
        assert_eq!(to_compass_point(Some(315.0)), Some(CompassPoint::NW));
    }

    #[test]
    fn sector_boundaries_round_half_up() {
        assert_eq!(to_compass_point(Some(22.4)), Some(CompassPoint::N));
        assert_eq!(to_compass_point(Some(22.5)), Some(CompassPoint::NE));
        assert_eq!(to_compass_point(Some(225.0)), Some(CompassPoint::SW));
    }

    #[test]
    fn every_degree_maps_to_a_point() {
        for tenth in 0..3600 {
            let deg = f64::from(tenth) / 10.0;
            assert!(to_compass_point(Some(deg)).is_some(), "no point for {deg}");
        }
    }

    #[test]
    fn unknown_is_not_north() {
        assert_eq!(to_compass_point(None), None);
        assert_eq!(to_compass_point(Some(f64::NAN)), None);
        assert_eq!(to_compass_point(Some(f64::INFINITY)), None);
    }

    #[test]
    fn out_of_range_wraps() {
        assert_eq!(to_compass_point(Some(-90.0)), Some(CompassPoint::W));
        assert_eq!(to_compass_point(Some(450.0)), Some(CompassPoint::E));
    }
}
