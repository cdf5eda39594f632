use std::path::{Path, PathBuf};

use campus_world::MaterialKey;
use hashbrown::HashMap;
use image::GenericImageView;

pub fn resolve_assets_root(cli: Option<&Path>) -> PathBuf {
    // Precedence: CLI flag -> CAMPUS_ASSETS env -> search nearby dirs -> CWD
    if let Some(p) = cli {
        if p.exists() {
            return p.to_path_buf();
        }
        log::warn!("assets dir {} does not exist; searching", p.display());
    }
    if let Ok(p) = std::env::var("CAMPUS_ASSETS") {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return pb;
        }
    }
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    for base in candidates {
        let mut cur = base.clone();
        for _ in 0..5 {
            if textures_dir(&cur).is_dir() {
                return cur;
            }
            if let Some(parent) = cur.parent() {
                cur = parent.to_path_buf();
            } else {
                break;
            }
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn textures_dir(root: &Path) -> PathBuf {
    root.join("assets/textures")
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join("campus.toml")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextureSource {
    File(PathBuf),
    /// Texture failed to load; draw a flat marker color instead.
    Placeholder,
    /// Untextured material.
    Color(u32),
}

#[derive(Clone, Debug)]
pub struct Material {
    pub source: TextureSource,
    pub polygon_offset: bool,
}

/// Material handles by key. Built once; a bad texture only affects its own surfaces.
pub struct MaterialLibrary {
    pub map: HashMap<MaterialKey, Material>,
}

impl MaterialLibrary {
    pub fn load(textures: &Path) -> Self {
        let mut map = HashMap::with_capacity(MaterialKey::ALL.len());
        for key in MaterialKey::ALL {
            let source = match (key.texture_file(), key.base_color()) {
                (Some(file), _) => {
                    let path = textures.join(file);
                    match decode_texture(&path) {
                        Ok((w, h)) => {
                            log::debug!("texture {} {}x{}", key.name(), w, h);
                            TextureSource::File(path)
                        }
                        Err(e) => {
                            log::error!("failed to load texture {} from {}: {}", key.name(), path.display(), e);
                            TextureSource::Placeholder
                        }
                    }
                }
                (None, Some(color)) => TextureSource::Color(color),
                (None, None) => TextureSource::Placeholder,
            };
            map.insert(
                key,
                Material {
                    source,
                    polygon_offset: key.polygon_offset(),
                },
            );
        }
        Self { map }
    }

    pub fn get(&self, key: MaterialKey) -> Option<&Material> {
        self.map.get(&key)
    }

    pub fn placeholder_count(&self) -> usize {
        self.map
            .values()
            .filter(|m| m.source == TextureSource::Placeholder)
            .count()
    }
}

/// Full decode; a corrupt body after a valid signature is an error.
fn decode_texture(path: &Path) -> Result<(u32, u32), image::ImageError> {
    let img = image::open(path)?;
    Ok(img.dimensions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("campus-assets-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_textures_become_placeholders() {
        let dir = scratch_dir("missing");
        let lib = MaterialLibrary::load(&dir);
        assert_eq!(lib.map.len(), MaterialKey::ALL.len());
        assert_eq!(lib.get(MaterialKey::Floor).unwrap().source, TextureSource::Placeholder);
        assert_eq!(
            lib.get(MaterialKey::Shrub).unwrap().source,
            TextureSource::Color(0x228B22)
        );
        assert_eq!(lib.placeholder_count(), 6);
    }

    #[test]
    fn valid_png_is_kept_and_bad_file_is_replaced() {
        let dir = scratch_dir("mixed");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 180, 160, 255]))
            .save(dir.join("floor.png"))
            .unwrap();
        fs::write(dir.join("ramp.png"), b"not an image").unwrap();
        let lib = MaterialLibrary::load(&dir);
        assert_eq!(
            lib.get(MaterialKey::Floor).unwrap().source,
            TextureSource::File(dir.join("floor.png"))
        );
        assert_eq!(lib.get(MaterialKey::Ramp).unwrap().source, TextureSource::Placeholder);
        assert!(lib.get(MaterialKey::InnerWall).unwrap().polygon_offset);
    }

    #[test]
    fn png_signature_with_corrupt_body_is_replaced() {
        let dir = scratch_dir("corrupt");
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(b"this is not a valid PNG body at all");
        fs::write(dir.join("floor.png"), &bytes).unwrap();
        let lib = MaterialLibrary::load(&dir);
        assert_eq!(lib.get(MaterialKey::Floor).unwrap().source, TextureSource::Placeholder);
        assert_eq!(lib.placeholder_count(), 6);
    }
}
