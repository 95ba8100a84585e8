use super::errors::{ErrorKind, Result};
use super::flat::outward_winding;
use failchain::bail;
use math::Pnt2f;
use std::result::Result as StdResult;

/// Splits a simple polygon, given as an ordered loop without a repeated closing point, into
/// triangles. Returns three indices into `polygon` per triangle.
pub trait Triangulator {
    fn triangulate(&self, polygon: &[Pnt2f]) -> StdResult<Vec<usize>, String>;
}

/// Ear clipping, via `earcutr`.
#[derive(Copy, Clone, Debug, Default)]
pub struct EarcutTriangulator;

impl Triangulator for EarcutTriangulator {
    fn triangulate(&self, polygon: &[Pnt2f]) -> StdResult<Vec<usize>, String> {
        let data: Vec<f64> = polygon
            .iter()
            .flat_map(|point| vec![f64::from(point.x), f64::from(point.y)])
            .collect();
        earcutr::earcut(&data, &[], 2).map_err(|error| format!("{:?}", error))
    }
}

/// Triangulates the boundary loop of `sector`, returning triangles wound for `FlatBuilder`.
pub fn triangulate_loop<TriangulatorT: Triangulator + ?Sized>(
    triangulator: &TriangulatorT,
    sector: usize,
    polygon: &[Pnt2f],
) -> Result<Vec<[Pnt2f; 3]>> {
    let indices = triangulator
        .triangulate(polygon)
        .map_err(|message| ErrorKind::triangulation(sector, message))?;
    if indices.len() % 3 != 0 {
        bail!(ErrorKind::triangulation(
            sector,
            format!("{} indices do not form whole triangles", indices.len()),
        ));
    }
    indices
        .chunks(3)
        .map(|chunk| -> Result<[Pnt2f; 3]> {
            let point = |index: usize| {
                polygon.get(index).copied().ok_or_else(|| {
                    ErrorKind::triangulation(sector, format!("index {} out of range", index))
                })
            };
            Ok(outward_winding([
                point(chunk[0])?,
                point(chunk[1])?,
                point(chunk[2])?,
            ]))
        })
        .collect()
}
