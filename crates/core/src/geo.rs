use std::fmt;

/// A fixed latitude/longitude pair, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Municipalities the dashboard knows about.
///
/// The set is closed: a city is only selectable if it is listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    PortoAlegre,
}

impl City {
    pub const ALL: [City; 1] = [City::PortoAlegre];

    /// Name shown in the city dropdown, also used as the option value.
    pub fn label(&self) -> &'static str {
        match self {
            City::PortoAlegre => "Porto Alegre",
        }
    }

    /// Filesystem and DOM friendly identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            City::PortoAlegre => "porto-alegre",
        }
    }

    pub fn point(&self) -> GeoPoint {
        match self {
            City::PortoAlegre => GeoPoint::new(-29.9153435, -51.2601959),
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
