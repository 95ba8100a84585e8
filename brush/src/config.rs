use super::errors::{ErrorKind, Result};
use failchain::ResultExt;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use wad::Transform;

/// Where textured faces point in the output, and how big flats are.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub wall_prefix: String,
    pub flat_prefix: String,
    pub default_material: String,
    pub flat_size: f32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        TextureConfig {
            wall_prefix: "art/wadtobrush/walls/".to_owned(),
            flat_prefix: "art/wadtobrush/flats/".to_owned(),
            default_material: "art/tile/common/shadow_caster".to_owned(),
            flat_size: 64.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub transform: Transform,
    pub textures: TextureConfig,
}

impl ConvertConfig {
    pub fn from_file<P: AsRef<Path>>(path: &P) -> Result<ConvertConfig> {
        let contents = fs::read_to_string(path).chain_err(ErrorKind::on_config_read)?;
        ConvertConfig::from_text(&contents)
    }

    pub fn from_text(text: &str) -> Result<ConvertConfig> {
        toml::from_str(text).chain_err(ErrorKind::on_config_parse)
    }
}
