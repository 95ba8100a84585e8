use super::solid::{Face, Projection, Solid, Surface};

const HEADER: &str = "Version 7\nHierarchyVersion 1\nentity{\n\tentityDef world {\n\t\tinherit = \
                      \"worldspawn\";\n\t\tedit = {\n\t\t}\n\t}\n";
const FOOTER: &str = "\n}";
const DEFAULT_PROJECTION: &str = "( ( 1 0 0 ) ( 0 1 0 ) )";

/// Accumulates one level's brushes as `brushDef3` text inside a single worldspawn entity.
///
/// Nothing is written anywhere until `finish` hands back the buffer.
pub struct MapWriter {
    buffer: String,
    default_material: String,
    next_handle: usize,
}

impl MapWriter {
    pub fn new<MaterialT: Into<String>>(default_material: MaterialT) -> Self {
        Self {
            buffer: HEADER.to_owned(),
            default_material: default_material.into(),
            next_handle: 0,
        }
    }

    /// Appends `solid` as the next brush and returns its handle.
    pub fn write_solid(&mut self, solid: &Solid) -> usize {
        let handle = self.next_handle;
        self.next_handle += 1;

        self.buffer
            .push_str(&format!("{{\n\thandle = {}\n\tbrushDef3 {{", handle));
        for face in solid.faces() {
            self.write_face(face);
        }
        self.buffer.push_str("\n\t}\n}\n");
        handle
    }

    pub fn num_brushes(&self) -> usize {
        self.next_handle
    }

    pub fn finish(mut self) -> String {
        self.buffer.push_str(FOOTER);
        self.buffer
    }

    fn write_face(&mut self, face: &Face) {
        let Face { plane, surface } = face;
        let (projection, material) = match surface {
            Surface::Default => (DEFAULT_PROJECTION.to_owned(), &self.default_material),
            Surface::Textured {
                projection: Projection { s, t },
                material,
            } => (
                format!(
                    "( ( {} {} {} ) ( {} {} {} ) )",
                    fixed(s[0]),
                    fixed(s[1]),
                    fixed(s[2]),
                    fixed(t[0]),
                    fixed(t[1]),
                    fixed(t[2])
                ),
                material,
            ),
        };
        let line = format!(
            "\n\t\t( {} {} {} {} ) {} \"{}\" 0 0 0",
            fixed(plane.normal.x),
            fixed(plane.normal.y),
            fixed(plane.normal.z),
            fixed(-plane.distance),
            projection,
            material
        );
        self.buffer.push_str(&line);
    }
}

fn fixed(value: f32) -> String {
    // Adding zero turns `-0.0` into `0.0`.
    format!("{:.8}", value + 0.0)
}

#[cfg(test)]
mod test {
    use super::MapWriter;
    use crate::solid::{Projection, Solid, Surface};
    use math::{vec3, Plane};

    fn solid() -> Solid {
        let mut solid = Solid::new();
        solid.bound(Plane::new(vec3(0.0, 0.0, -1.0), 0.0)).face(
            Plane::new(vec3(0.0, 0.0, 1.0), 2.5),
            Surface::Textured {
                projection: Projection {
                    s: [0.5, 0.0, -1.0],
                    t: [0.0, 0.25, 0.125],
                },
                material: "art/wadtobrush/flats/FLAT1".to_owned(),
            },
        );
        solid
    }

    #[test]
    fn empty_map() {
        let writer = MapWriter::new("shadow");
        assert_eq!(writer.num_brushes(), 0);
        assert_eq!(
            writer.finish(),
            "Version 7\nHierarchyVersion 1\nentity{\n\tentityDef world {\n\t\tinherit = \
             \"worldspawn\";\n\t\tedit = {\n\t\t}\n\t}\n\n}"
        );
    }

    #[test]
    fn brush_block() {
        let mut writer = MapWriter::new("shadow");
        assert_eq!(writer.write_solid(&solid()), 0);
        let map = writer.finish();
        let expected = "{\n\thandle = 0\n\tbrushDef3 {\
                        \n\t\t( 0.00000000 0.00000000 -1.00000000 0.00000000 ) \
                        ( ( 1 0 0 ) ( 0 1 0 ) ) \"shadow\" 0 0 0\
                        \n\t\t( 0.00000000 0.00000000 1.00000000 -2.50000000 ) \
                        ( ( 0.50000000 0.00000000 -1.00000000 ) \
                        ( 0.00000000 0.25000000 0.12500000 ) ) \
                        \"art/wadtobrush/flats/FLAT1\" 0 0 0\
                        \n\t}\n}\n";
        assert!(map.contains(expected), "{}", map);
        assert!(map.ends_with("\n\t}\n}\n\n}"));
    }

    #[test]
    fn handles_are_sequential() {
        let mut writer = MapWriter::new("shadow");
        let handles: Vec<_> = (0..3).map(|_| writer.write_solid(&solid())).collect();
        assert_eq!(handles, vec![0, 1, 2]);
        assert_eq!(writer.num_brushes(), 3);
        let map = writer.finish();
        assert!(map.contains("handle = 2\n"));
        assert_eq!(map.matches("brushDef3").count(), 3);
    }
}
