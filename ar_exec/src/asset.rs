//! # Marker Asset
//!
//! The marker model is loaded once at startup in the background. The result is only used to flip
//! pose control between showing the marker and running without one.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use log::{debug, warn};
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Magic bytes at the start of a binary glTF file.
const GLB_MAGIC: &[u8; 4] = b"glTF";

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("Marker asset not found at {0:?}")]
    NotFound(PathBuf),

    #[error("Cannot read the marker asset {0:?}: {1}")]
    Unreadable(PathBuf, std::io::Error),

    #[error("Marker asset {0:?} is not a binary glTF model")]
    NotAModel(PathBuf),

    #[error("The asset loader stopped before reporting a result")]
    LoaderLost,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Check that the marker model at `path` can be loaded.
pub fn load_marker_asset(path: &Path) -> Result<(), AssetLoadError> {
    if !path.exists() {
        return Err(AssetLoadError::NotFound(path.to_path_buf()));
    }

    let mut magic = [0u8; 4];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut magic))
        .map_err(|e| AssetLoadError::Unreadable(path.to_path_buf(), e))?;

    if &magic != GLB_MAGIC {
        return Err(AssetLoadError::NotAModel(path.to_path_buf()));
    }

    debug!("Marker asset {:?} loaded", path);

    Ok(())
}

/// Load the marker model in a background thread.
///
/// The returned receiver yields exactly one result.
pub fn spawn_loader(path: PathBuf) -> Receiver<Result<(), AssetLoadError>> {
    let (tx, rx) = channel();

    thread::spawn(move || {
        if tx.send(load_marker_asset(&path)).is_err() {
            warn!("Marker asset load result was not received");
        }
    });

    rx
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ar_exec_{}_{}", std::process::id(), name));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_load_marker_asset() {
        let good = temp_file("arrow.glb", b"glTF\x02\x00\x00\x00");
        assert!(load_marker_asset(&good).is_ok());

        let bad = temp_file("arrow.txt", b"not a model");
        assert!(matches!(
            load_marker_asset(&bad),
            Err(AssetLoadError::NotAModel(_))
        ));

        let short = temp_file("short.glb", b"gl");
        assert!(matches!(
            load_marker_asset(&short),
            Err(AssetLoadError::Unreadable(_, _))
        ));

        assert!(matches!(
            load_marker_asset(Path::new("/definitely/not/here.glb")),
            Err(AssetLoadError::NotFound(_))
        ));

        for p in [good, bad, short].iter() {
            std::fs::remove_file(p).ok();
        }
    }

    #[test]
    fn test_shipped_marker_asset() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/arrow.glb");

        assert!(load_marker_asset(&path).is_ok());
    }

    #[test]
    fn test_spawn_loader() {
        let rx = spawn_loader(PathBuf::from("/definitely/not/here.glb"));

        assert!(matches!(rx.recv().unwrap(), Err(AssetLoadError::NotFound(_))));
    }
}
