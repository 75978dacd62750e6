use crate::crs::{Coord3, Lv95};

/// Surface attribute of a path segment, derived from the Veloland
/// `BelagTLM` field. `hart` is paved, everything else counts as unpaved.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Surface {
    Paved,
    Unpaved,
}

impl Surface {
    pub fn from_belag(value: Option<&str>) -> Surface {
        match value {
            Some("hart") => Surface::Paved,
            _ => Surface::Unpaved,
        }
    }

    pub fn is_paved(&self) -> bool {
        matches!(self, Surface::Paved)
    }
}

/// A single cycling-path polyline in LV95 metres with elevation.
/// MultiLineString source features are exploded into one segment
/// per part before construction. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub geometry: Vec<Coord3>,
    pub surface: Surface,
}

impl RouteSegment {
    pub fn new(geometry: Vec<Coord3>, surface: Surface) -> Self {
        RouteSegment { geometry, surface }
    }

    pub fn first(&self) -> Lv95 {
        self.geometry[0].planar()
    }

    pub fn last(&self) -> Lv95 {
        self.geometry[self.geometry.len() - 1].planar()
    }

    /// Planar length in metres, summed over the polyline.
    pub fn length_m(&self) -> f64 {
        self.geometry
            .windows(2)
            .map(|pair| pair[0].planar().distance(&pair[1].planar()))
            .sum()
    }

    pub fn length_km(&self) -> f64 {
        self.length_m() / 1000.0
    }

    /// Cumulative height gain and loss in metres, walking the
    /// polyline in stored vertex order.
    pub fn height_diff(&self) -> (f64, f64) {
        let mut gain = 0.0;
        let mut loss = 0.0;

        for pair in self.geometry.windows(2) {
            let diff = pair[1].z - pair[0].z;
            if diff > 0.0 {
                gain += diff;
            } else {
                loss += -diff;
            }
        }

        (gain, loss)
    }

    /// Mean elevation over the polyline vertices,
    /// used for the height profile.
    pub fn mean_elevation(&self) -> f64 {
        let sum: f64 = self.geometry.iter().map(|c| c.z).sum();
        sum / self.geometry.len() as f64
    }

    /// The same segment walked in the opposite direction.
    pub fn reversed(&self) -> RouteSegment {
        let mut geometry = self.geometry.clone();
        geometry.reverse();
        RouteSegment {
            geometry,
            surface: self.surface,
        }
    }
}
