use std::fs::{self, File, Metadata};
use std::io::{BufReader, Write};
use std::path::Path;

use crate::codec::FrameConfig;
use crate::convert::{decode, encode};
use crate::error::Result;
use crate::header::{Header, HeaderLayout};

/// Encode the file at `path` as a PNG written to `writer`.
///
/// Size and permission mode come from the file's metadata.
pub fn encode_file<W: Write>(
    path: impl AsRef<Path>,
    writer: W,
    config: &FrameConfig,
) -> Result<Header> {
    let file = File::open(path.as_ref())?;
    let meta = file.metadata()?;
    encode(
        BufReader::new(file),
        meta.len(),
        file_mode(&meta),
        writer,
        config,
    )
}

/// Decode the PNG at `path`, writing the payload to `writer`.
pub fn decode_file<W: Write>(
    path: impl AsRef<Path>,
    writer: W,
    layout: &HeaderLayout,
) -> Result<Header> {
    let image = fs::read(path.as_ref())?;
    decode(&image, writer, layout)
}

/// Permission bits of a file.
#[cfg(unix)]
pub fn file_mode(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    meta.permissions().mode() & 0o7777
}

/// Permission bits of a file, approximated from the read-only flag.
#[cfg(not(unix))]
pub fn file_mode(meta: &Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Set the permission bits of `path` to `mode`.
#[cfg(unix)]
pub fn apply_mode(path: impl AsRef<Path>, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o7777))?;
    Ok(())
}

/// No-op outside Unix.
#[cfg(not(unix))]
pub fn apply_mode(_path: impl AsRef<Path>, _mode: u32) -> Result<()> {
    Ok(())
}
