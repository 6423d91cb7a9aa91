//! Exact polygon constraint: multi-polygon geometry plus its envelope.
//!
//! The envelope doubles as a cheap box pre-filter over the same selection
//! machinery; the exact containment test then narrows whatever the envelope
//! let through. A polygon whose vertices are expressed past ±180 (the usual
//! way an antimeridian-crossing search area arrives) sets a crossing flag,
//! and every subsequent longitude comparison, envelope and exact alike,
//! normalizes the point by ±360 into the polygon's frame first.

use geo::{BoundingRect, Contains};
use geo_types::{Coord, LineString, MultiPolygon, Point, Polygon};
use serde_json::Value;

use crate::constraint::GeoBox;
use crate::subset_error::SubsetError;

/// A (possibly multi-part, possibly holed) polygon constraint.
#[derive(Clone, Debug)]
pub struct GeoPolygon {
    polygons: MultiPolygon<f64>,
    envelope: GeoBox,
    crossed_east: bool,
    crossed_west: bool,
}

impl GeoPolygon {
    /// Build from geometry already in `geo` form.
    ///
    /// Fails with [`SubsetError::InvalidPolygon`] when the geometry is empty
    /// (no envelope exists to pre-filter with).
    pub fn from_multi_polygon(polygons: MultiPolygon<f64>) -> Result<Self, SubsetError> {
        let rect = polygons
            .bounding_rect()
            .ok_or_else(|| SubsetError::InvalidPolygon("empty geometry".into()))?;
        let (w, s) = (rect.min().x, rect.min().y);
        let (e, n) = (rect.max().x, rect.max().y);
        Ok(Self {
            polygons,
            envelope: GeoBox::new(w, s, e, n),
            crossed_east: e > 180.0,
            crossed_west: w < -180.0,
        })
    }

    /// Parse a GeoJSON document and collect every `Polygon` / `MultiPolygon`
    /// it contains, descending through `Feature`, `FeatureCollection`, and
    /// `GeometryCollection` wrappers.
    pub fn from_geojson(text: &str) -> Result<Self, SubsetError> {
        let root: Value =
            serde_json::from_str(text).map_err(|e| SubsetError::InvalidPolygon(e.to_string()))?;
        let mut polys = Vec::new();
        collect_polygons(&root, &mut polys)?;
        if polys.is_empty() {
            return Err(SubsetError::InvalidPolygon(
                "no Polygon or MultiPolygon geometry found".into(),
            ));
        }
        Self::from_multi_polygon(MultiPolygon::new(polys))
    }

    /// Minimal bounding box around all parts, used as the pre-filter box.
    #[inline]
    pub fn envelope(&self) -> GeoBox {
        self.envelope
    }

    #[inline]
    pub fn crossed_east(&self) -> bool {
        self.crossed_east
    }

    #[inline]
    pub fn crossed_west(&self) -> bool {
        self.crossed_west
    }

    /// Exact point-in-polygon test, in the polygon's longitude frame.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        let mut lon = lon;
        if self.crossed_east && lon < 0.0 {
            lon += 360.0;
        } else if self.crossed_west && lon > 0.0 {
            lon -= 360.0;
        }
        self.polygons.contains(&Point::new(lon, lat))
    }
}

fn geojson_type(node: &Value) -> &str {
    node.get("type").and_then(Value::as_str).unwrap_or("")
}

fn collect_polygons(node: &Value, out: &mut Vec<Polygon<f64>>) -> Result<(), SubsetError> {
    match geojson_type(node) {
        "Polygon" => {
            if let Some(rings) = node.get("coordinates") {
                out.push(parse_polygon(rings)?);
            }
        }
        "MultiPolygon" => {
            if let Some(parts) = node.get("coordinates").and_then(Value::as_array) {
                for rings in parts {
                    out.push(parse_polygon(rings)?);
                }
            }
        }
        "Feature" => {
            if let Some(geometry) = node.get("geometry") {
                collect_polygons(geometry, out)?;
            }
        }
        "FeatureCollection" => {
            if let Some(features) = node.get("features").and_then(Value::as_array) {
                for feature in features {
                    collect_polygons(feature, out)?;
                }
            }
        }
        "GeometryCollection" => {
            if let Some(geometries) = node.get("geometries").and_then(Value::as_array) {
                for geometry in geometries {
                    collect_polygons(geometry, out)?;
                }
            }
        }
        // Points, lines, and unknown types contribute nothing to an area
        // constraint.
        _ => {}
    }
    Ok(())
}

fn parse_polygon(rings: &Value) -> Result<Polygon<f64>, SubsetError> {
    let rings = rings
        .as_array()
        .ok_or_else(|| SubsetError::InvalidPolygon("polygon coordinates must be an array".into()))?;
    let mut parsed = rings.iter().map(parse_ring);
    let exterior = parsed
        .next()
        .transpose()?
        .ok_or_else(|| SubsetError::InvalidPolygon("polygon has no exterior ring".into()))?;
    let interiors = parsed.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

fn parse_ring(ring: &Value) -> Result<LineString<f64>, SubsetError> {
    let points = ring
        .as_array()
        .ok_or_else(|| SubsetError::InvalidPolygon("ring must be an array of positions".into()))?;
    let mut coords = Vec::with_capacity(points.len());
    for position in points {
        let position = position
            .as_array()
            .filter(|p| p.len() >= 2)
            .ok_or_else(|| SubsetError::InvalidPolygon("position must hold [lon, lat]".into()))?;
        let x = position[0]
            .as_f64()
            .ok_or_else(|| SubsetError::InvalidPolygon("longitude must be numeric".into()))?;
        let y = position[1]
            .as_f64()
            .ok_or_else(|| SubsetError::InvalidPolygon("latitude must be numeric".into()))?;
        coords.push(Coord { x, y });
    }
    Ok(LineString::new(coords))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(w: f64, s: f64, e: f64, n: f64) -> String {
        format!(
            r#"{{"type":"Polygon","coordinates":[[[{w},{s}],[{e},{s}],[{e},{n}],[{w},{n}],[{w},{s}]]]}}"#
        )
    }

    #[test]
    fn polygon_containment() {
        let poly = GeoPolygon::from_geojson(&square(-10.0, -10.0, 10.0, 10.0)).unwrap();
        assert!(poly.contains(0.0, 0.0));
        assert!(!poly.contains(0.0, 15.0));
        assert!(!poly.contains(-20.0, 0.0));
    }

    #[test]
    fn envelope_matches_vertices() {
        let poly = GeoPolygon::from_geojson(&square(-10.0, -5.0, 20.0, 15.0)).unwrap();
        let b = poly.envelope();
        assert_eq!(
            (b.west(), b.south(), b.east(), b.north()),
            (-10.0, -5.0, 20.0, 15.0)
        );
        assert!(!poly.crossed_east());
        assert!(!poly.crossed_west());
    }

    #[test]
    fn hole_is_excluded() {
        let geojson = r#"{"type":"Polygon","coordinates":[
            [[-10,-10],[10,-10],[10,10],[-10,10],[-10,-10]],
            [[-2,-2],[2,-2],[2,2],[-2,2],[-2,-2]]
        ]}"#;
        let poly = GeoPolygon::from_geojson(geojson).unwrap();
        assert!(poly.contains(5.0, 5.0));
        assert!(!poly.contains(0.0, 0.0));
    }

    #[test]
    fn feature_collection_unwraps() {
        let geojson = format!(
            r#"{{"type":"FeatureCollection","features":[
                {{"type":"Feature","properties":{{}},"geometry":{}}}
            ]}}"#,
            square(0.0, 0.0, 5.0, 5.0)
        );
        let poly = GeoPolygon::from_geojson(&geojson).unwrap();
        assert!(poly.contains(2.0, 2.0));
    }

    #[test]
    fn multi_polygon_covers_all_parts() {
        let geojson = r#"{"type":"MultiPolygon","coordinates":[
            [[[0,0],[5,0],[5,5],[0,5],[0,0]]],
            [[[20,20],[25,20],[25,25],[20,25],[20,20]]]
        ]}"#;
        let poly = GeoPolygon::from_geojson(geojson).unwrap();
        assert!(poly.contains(2.0, 2.0));
        assert!(poly.contains(22.0, 22.0));
        assert!(!poly.contains(10.0, 10.0));
    }

    #[test]
    fn antimeridian_crossing_normalizes_points() {
        // Search area written as lon 170..190: vertices past +180.
        let poly = GeoPolygon::from_geojson(&square(170.0, -10.0, 190.0, 10.0)).unwrap();
        assert!(poly.crossed_east());
        assert!(poly.contains(0.0, 175.0));
        assert!(poly.contains(0.0, -175.0)); // lands at 185 after +360
        assert!(!poly.contains(0.0, -160.0));
    }

    #[test]
    fn rejects_non_area_geojson() {
        assert!(GeoPolygon::from_geojson(r#"{"type":"Point","coordinates":[0,0]}"#).is_err());
        assert!(GeoPolygon::from_geojson("not json at all").is_err());
    }
}
