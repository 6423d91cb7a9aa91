//! User-supplied subset constraints: bounding boxes, a polygon, a temporal
//! window.
//!
//! These are plain data handed in by the surrounding configuration layer.
//! The resolver only ever asks two questions of them: "is anything
//! constrained at all?" and "does this (lat, lon) / time value pass?".

pub mod geobox;
pub mod polygon;
pub mod temporal;

pub use geobox::GeoBox;
pub use polygon::GeoPolygon;
pub use temporal::TemporalWindow;

/// The full constraint set for one subset run.
#[derive(Clone, Debug, Default)]
pub struct Constraints {
    /// Zero or more axis-aligned lon/lat boxes; a point passes when any box
    /// contains it.
    pub boxes: Vec<GeoBox>,
    /// Optional exact polygon filter, applied after the box pre-filter.
    pub polygon: Option<GeoPolygon>,
    /// Optional inclusive time window in seconds since the run's epoch.
    pub temporal: Option<TemporalWindow>,
}

impl Constraints {
    /// No boxes, no polygon, no window: every group resolves unconstrained
    /// and the copy layer copies all rows.
    pub fn is_unconstrained(&self) -> bool {
        self.boxes.is_empty() && self.polygon.is_none() && self.temporal.is_none()
    }

    /// Whether any spatial constraint (box or polygon) is present.
    pub fn has_spatial(&self) -> bool {
        !self.boxes.is_empty() || self.polygon.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unconstrained() {
        let c = Constraints::default();
        assert!(c.is_unconstrained());
        assert!(!c.has_spatial());
    }

    #[test]
    fn any_field_constrains() {
        let c = Constraints {
            temporal: Some(TemporalWindow::new(0.0, 1.0)),
            ..Default::default()
        };
        assert!(!c.is_unconstrained());
        assert!(!c.has_spatial());

        let c = Constraints {
            boxes: vec![GeoBox::new(-10.0, -5.0, 10.0, 5.0)],
            ..Default::default()
        };
        assert!(c.has_spatial());
    }
}
