use math::{Plane, Pnt3f};

/// How far sealing planes sit beyond a solid's visible face, so no solid is zero-thickness.
pub const SEAL_OFFSET: f32 = 0.0075;

/// Texture matrix of a face: `u = s . (x, y, 1)`, `v = t . (x, y, 1)`, where `(x, y)` are the
/// coordinates along the face's texture axes.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub s: [f32; 3],
    pub t: [f32; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub enum Surface {
    /// Unit projection with the configured default material.
    Default,
    Textured {
        projection: Projection,
        material: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub plane: Plane,
    pub surface: Surface,
}

/// A convex solid: the intersection of its faces' half-spaces. At most one face is textured.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solid {
    faces: Vec<Face>,
}

impl Solid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bound(&mut self, plane: Plane) -> &mut Self {
        self.faces.push(Face {
            plane,
            surface: Surface::Default,
        });
        self
    }

    /// Adds a face with `surface`. A second textured face replaces the texture of the first one
    /// with the default surface.
    pub fn face(&mut self, plane: Plane, surface: Surface) -> &mut Self {
        if let Surface::Textured { .. } = surface {
            for face in &mut self.faces {
                face.surface = Surface::Default;
            }
        }
        self.faces.push(Face { plane, surface });
        self
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn textured_face(&self) -> Option<&Face> {
        self.faces.iter().find(|face| face.surface != Surface::Default)
    }

    /// True if `point` is inside or within `epsilon` of every face.
    pub fn contains(&self, point: Pnt3f, epsilon: f32) -> bool {
        self.faces
            .iter()
            .all(|face| face.plane.signed_distance(point) <= epsilon)
    }
}
