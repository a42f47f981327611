use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::foundation::error::{ConvertError, ConvertResult};

use super::model::AnimationDocument;

/// Render `doc` as compact Lottie JSON. Absent optional fields are omitted.
pub fn to_vec(doc: &AnimationDocument) -> ConvertResult<Vec<u8>> {
    doc.validate()?;
    serde_json::to_vec(doc).map_err(|e| ConvertError::serialization(e.to_string()))
}

pub fn to_writer<W: Write>(doc: &AnimationDocument, writer: W) -> ConvertResult<()> {
    doc.validate()?;
    serde_json::to_writer(writer, doc).map_err(|e| ConvertError::serialization(e.to_string()))
}

pub fn from_slice(bytes: &[u8]) -> ConvertResult<AnimationDocument> {
    serde_json::from_slice(bytes).map_err(|e| ConvertError::serialization(e.to_string()))
}

pub fn read_file(path: &Path) -> ConvertResult<AnimationDocument> {
    let f = File::open(path)
        .map_err(|e| ConvertError::io(format!("open '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(f)).map_err(|e| {
        ConvertError::serialization(format!("parse '{}': {e}", path.display()))
    })
}

pub fn ensure_parent_dir(path: &Path) -> ConvertResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConvertError::io(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Serialize `doc` into `path`, creating parent directories as needed.
pub fn write_file(doc: &AnimationDocument, path: &Path, overwrite: bool) -> ConvertResult<()> {
    if !overwrite && path.exists() {
        return Err(ConvertError::io(format!(
            "output file '{}' already exists",
            path.display()
        )));
    }
    ensure_parent_dir(path)?;

    let f = File::create(path)
        .map_err(|e| ConvertError::io(format!("create '{}': {e}", path.display())))?;
    let mut w = BufWriter::new(f);
    to_writer(doc, &mut w)?;
    w.flush()
        .map_err(|e| ConvertError::io(format!("write '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/document/serialize.rs"]
mod tests;
