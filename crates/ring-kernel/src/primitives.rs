//! Higher-level primitive builders on top of truck's sweep API.
//!
//! truck has no built-in cylinder/sphere; both are built from successive sweeps.

use std::f64::consts::{PI, TAU};
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Face, Solid, Wire};
use truck_modeling::{EuclideanSpace, InnerSpace, Point3, Rad, Vector3};

use crate::types::KernelError;

/// Create a planar face from a closed polygon. Vertices are shared between
/// consecutive edges so the wire is closed.
pub fn make_polygon_face(points: &[Point3]) -> Result<Face, KernelError> {
    if points.len() < 3 {
        return Err(KernelError::InvalidProfile {
            reason: format!("profile has {} points, need at least 3", points.len()),
        });
    }
    let normal = (points[1] - points[0]).cross(points[2] - points[0]);
    if normal.magnitude() < 1e-12 {
        return Err(KernelError::InvalidProfile {
            reason: "first three profile points are collinear".to_string(),
        });
    }

    let vertices: Vec<_> = points.iter().map(|&p| builder::vertex(p)).collect();
    let n = vertices.len();
    let edges: Vec<Edge> = (0..n)
        .map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]))
        .collect();
    let wire = Wire::from_iter(edges);

    builder::try_attach_plane(&[wire]).map_err(|e| KernelError::InvalidProfile {
        reason: format!("failed to attach plane: {}", e),
    })
}

/// Revolve a face around an axis through `origin`. A full turn closes the sweep.
pub fn revolve(face: &Face, origin: Point3, axis: Vector3, angle: f64) -> Solid {
    builder::rsweep(face, origin, axis.normalize(), Rad(angle))
}

/// Angle of the first seam on swept circles and on the sphere's meridians.
/// Seams at 0°/120°/240° put cylinder cap vertices and sphere latitude
/// vertices within boolean tolerance of each other when a prong stands
/// on a stone.
pub const SEAM_PHASE: f64 = PI / 6.0;

/// Cylinder along +Z, centered at the origin.
pub fn make_cylinder(radius: f64, height: f64) -> Result<Solid, KernelError> {
    if radius <= 0.0 || height <= 0.0 {
        return Err(KernelError::InvalidParameter {
            reason: format!("cylinder radius {} height {} must be positive", radius, height),
        });
    }
    let base = Point3::new(0.0, 0.0, -height / 2.0);
    let (sin, cos) = SEAM_PHASE.sin_cos();
    let v = builder::vertex(Point3::new(radius * cos, radius * sin, -height / 2.0));
    let circle: Wire = builder::rsweep(&v, base, Vector3::unit_z(), Rad(TAU));
    let disc = builder::try_attach_plane(&[circle]).map_err(|e| KernelError::InvalidProfile {
        reason: format!("failed to create circular face: {}", e),
    })?;
    Ok(builder::tsweep(&disc, Vector3::new(0.0, 0.0, height)))
}

/// Sphere centered at the origin.
///
/// A meridian arc from the pole at +X to the pole at -X is spun around X.
/// Both arc ends lie on the axis, so `cone` closes the shell without
/// degenerate seam faces.
///
/// The poles sit on X so that no sphere edge lies in a horizontal plane.
/// The sweep splits the meridian at 60° and 120°; with poles on Z those
/// latitude circles sit at `±radius / 2`, which is exactly the base plane
/// of a prong standing at the stone's lower half, and truck's union fails
/// on the coplanar edge.
pub fn make_sphere(radius: f64) -> Result<Solid, KernelError> {
    if radius <= 0.0 {
        return Err(KernelError::InvalidParameter {
            reason: format!("sphere radius {} must be positive", radius),
        });
    }
    let pole = builder::vertex(Point3::new(radius, 0.0, 0.0));
    let (sin, cos) = SEAM_PHASE.sin_cos();
    // Rotating +X about this axis sweeps through (0, cos, sin).
    let sweep_axis = Vector3::new(0.0, -sin, cos);
    let meridian: Wire = builder::rsweep(&pole, Point3::origin(), sweep_axis, Rad(PI));
    let shell = builder::cone(&meridian, Vector3::unit_x(), Rad(TAU));
    Solid::try_new(vec![shell]).map_err(|e| KernelError::InvalidProfile {
        reason: format!("sphere shell is not closed: {}", e),
    })
}

/// Copy of `solid` moved by `offset`.
pub fn translated(solid: &Solid, offset: Vector3) -> Solid {
    builder::translated(solid, offset)
}
