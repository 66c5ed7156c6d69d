//! Whole-file load and save, dispatched on the file extension.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::builder::TreeBuilder;
use crate::error::{Error, Result, Warning};
use crate::options::ReadOptions;
use crate::reader::ChunkReader;
use crate::registry::registry;
use crate::serializer::TreeSerializer;
use crate::tree::ChunkTree;

/// Model file formats known by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Binary chunked model. The only format with an implementation.
    W3d,
    /// XML sibling format.
    W3x,
    Blend,
    Max,
}

impl FileType {
    /// Detect the file type from the path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "w3d" => Ok(Self::W3d),
            "w3x" => Ok(Self::W3x),
            "blend" => Ok(Self::Blend),
            "max" => Ok(Self::Max),
            "" => Err(Error::UnsupportedFileType(format!(
                "{} has no extension",
                path.display()
            ))),
            other => Err(Error::UnsupportedFileType(format!(".{other}"))),
        }
    }

    pub fn is_implemented(self) -> bool {
        self == Self::W3d
    }

    fn require_implemented(self) -> Result<()> {
        if self.is_implemented() {
            Ok(())
        } else {
            Err(Error::UnsupportedFileType(format!("{self} is not implemented")))
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::W3d => "W3D",
            Self::W3x => "W3X",
            Self::Blend => "Blender",
            Self::Max => "3ds Max",
        };
        write!(f, "{name}")
    }
}

/// A parsed model file and the warnings raised while reading it.
#[derive(Debug)]
pub struct LoadedModel {
    pub tree: ChunkTree,
    pub warnings: Vec<Warning>,
}

/// Parse an in-memory W3D file with the process-wide registry.
pub fn parse_model(data: &[u8], options: &ReadOptions) -> Result<LoadedModel> {
    let mut reader = ChunkReader::new(data);
    let mut builder = TreeBuilder::new(registry()).with_options(options.clone());
    let tree = builder.build(&mut reader)?;
    Ok(LoadedModel {
        tree,
        warnings: builder.take_warnings(),
    })
}

/// Read and parse a model file.
pub fn load_model(path: &Path, options: &ReadOptions) -> Result<LoadedModel> {
    FileType::from_path(path)?.require_implemented()?;
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "loading model");
    parse_model(&data, options)
}

/// Serialize a tree and write it to `path`.
///
/// The bytes go to a sibling temporary file that is renamed over `path` only
/// once fully written, so a failed save never leaves a partial model behind.
pub fn save_model(tree: &ChunkTree, path: &Path) -> Result<()> {
    FileType::from_path(path)?.require_implemented()?;
    let bytes = TreeSerializer::new(registry()).to_bytes(tree)?;

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    debug!(path = %path.display(), bytes = bytes.len(), "saved model");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_from_extension() {
        assert_eq!(FileType::from_path(Path::new("tank.w3d")).unwrap(), FileType::W3d);
        assert_eq!(FileType::from_path(Path::new("TANK.W3D")).unwrap(), FileType::W3d);
        assert_eq!(FileType::from_path(Path::new("tank.w3x")).unwrap(), FileType::W3x);
        assert_eq!(FileType::from_path(Path::new("tank.blend")).unwrap(), FileType::Blend);
        assert_eq!(FileType::from_path(Path::new("tank.max")).unwrap(), FileType::Max);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        assert!(matches!(
            FileType::from_path(Path::new("tank.obj")),
            Err(Error::UnsupportedFileType(_))
        ));
        assert!(matches!(
            FileType::from_path(Path::new("tank")),
            Err(Error::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn declared_formats_are_not_attempted() {
        let tree = ChunkTree::default();
        let path = std::env::temp_dir().join("w3d-model-test-never-written.w3x");
        let err = save_model(&tree, &path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
        assert!(!path.exists());

        let err = load_model(Path::new("missing.blend"), &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }

    #[test]
    fn temp_path_is_a_sibling() {
        let tmp = temp_path(Path::new("/models/tank.w3d"));
        assert_eq!(tmp, Path::new("/models/tank.w3d.tmp"));
    }
}
