mod boundary;
mod config;
mod convert;
mod errors;
mod flat;
mod solid;
mod triangulate;
mod wall;
mod writer;

pub use self::boundary::{reconstruct_loop, Edge, SectorBoundaries, TopologyFailure};
pub use self::config::{ConvertConfig, TextureConfig};
pub use self::convert::{ConvertStats, ConvertedLevel, LevelConverter};
pub use self::errors::{Error, ErrorKind, Result};
pub use self::flat::{Cap, FlatBuilder};
pub use self::solid::{Face, Projection, Solid, Surface, SEAL_OFFSET};
pub use self::triangulate::{triangulate_loop, EarcutTriangulator, Triangulator};
pub use self::wall::{
    draw_height, side_walls, Heights, Pegging, WallBuilder, WallSection, WallSegment,
};
pub use self::writer::MapWriter;
