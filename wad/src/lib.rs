mod archive;
mod errors;
mod level;
mod name;
mod transform;

pub mod tex;
pub mod types;
pub mod util;

pub use self::archive::{Archive, LumpReader};
pub use self::errors::{Error, ErrorKind, Result};
pub use self::level::{Level, Sector, Sidedef};
pub use self::name::WadName;
pub use self::tex::{TextureDirectory, TextureMetrics, TextureSize};
pub use self::transform::Transform;
