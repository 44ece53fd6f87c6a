//! On-disk artifacts: one encoded file per codec.
//!
//! A collaborator of the harness, never part of it — writes happen
//! strictly outside timed regions. Files are named deterministically by
//! format (`data.json`, `data.xml`, `data.proto`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::codec::Codec;
use crate::dataset::Dataset;

#[derive(Debug, Clone)]
pub struct Artifact {
    pub codec: String,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Encode the dataset with each codec and write the results into `dir`,
/// creating it if needed.
pub fn write_all(codecs: &[&dyn Codec], dataset: &Dataset, dir: &Path) -> io::Result<Vec<Artifact>> {
    fs::create_dir_all(dir)?;

    let mut out = Vec::with_capacity(codecs.len());
    for codec in codecs {
        let bytes = codec.encode(dataset).map_err(io::Error::other)?;
        let path = dir.join(format!("data.{}", codec.file_extension()));
        fs::write(&path, &bytes)?;
        out.push(Artifact {
            codec: codec.name().to_string(),
            path,
            bytes: bytes.len() as u64,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{registry, FieldSchema};
    use crate::dataset;
    use crate::CodecKind;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn writes_one_artifact_per_codec() {
        let schema = Arc::new(FieldSchema::embedded().unwrap());
        let codecs = registry(CodecKind::All, schema);
        let refs: Vec<&dyn Codec> = codecs.iter().map(|c| c.as_ref()).collect();
        let ds = dataset::canonical();
        let dir = tempdir().unwrap();

        let artifacts = write_all(&refs, &ds, dir.path()).unwrap();

        assert_eq!(artifacts.len(), 3);
        for artifact in &artifacts {
            let written = fs::metadata(&artifact.path).unwrap().len();
            assert_eq!(written, artifact.bytes);
            assert!(artifact.bytes > 0);
        }
        assert!(dir.path().join("data.json").exists());
        assert!(dir.path().join("data.xml").exists());
        assert!(dir.path().join("data.proto").exists());
    }

    #[test]
    fn artifact_names_are_deterministic() {
        let schema = Arc::new(FieldSchema::embedded().unwrap());
        let codecs = registry(CodecKind::Json, schema);
        let refs: Vec<&dyn Codec> = codecs.iter().map(|c| c.as_ref()).collect();
        let dir = tempdir().unwrap();

        let a = write_all(&refs, &dataset::canonical(), dir.path()).unwrap();
        let b = write_all(&refs, &dataset::canonical(), dir.path()).unwrap();

        assert_eq!(a[0].path, b[0].path);
        assert_eq!(a[0].bytes, b[0].bytes);
    }
}
