//! Fixture builders for the trigger probes.
//!
//! # Scope
//! One builder per probe: a well-formed gzip stream, a gzip stream that
//! fails mid-read, and a zip archive whose target entry declares an absurd
//! uncompressed size. Fixture contents are benign filler; only the metadata
//! is malformed.
//!
//! # Invariants
//! - Builders are deterministic: the same arguments produce the same bytes.
//! - The lying zip keeps every structural field correct (signatures,
//!   offsets, CRCs) except the one declared size under test.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

/// Filler byte for generated payloads.
pub const FILLER_BYTE: u8 = 0x41;

/// Name and length of the truthful first zip entry.
pub const FILLER_ENTRY_NAME: &[u8] = b"filler";
pub const FILLER_ENTRY_LEN: usize = 64;

/// Name and real length of the lying zip entry.
pub const OVERFLOW_ENTRY_NAME: &[u8] = b"overflow";
pub const OVERFLOW_ENTRY_LEN: usize = 256;

/// Declared uncompressed size of the lying entry.
pub const LYING_DECLARED_SIZE: u32 = 0xffff_fffe;

/// Default payload for generated stream fixtures.
pub fn default_stream_payload() -> Vec<u8> {
    vec![FILLER_BYTE; 4096]
}

/// Write a well-formed single-member gzip fixture holding `payload`.
pub fn write_gzip_fixture(path: &Path, payload: &[u8]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(payload)?;
    enc.finish()?;
    Ok(())
}

/// Write a gzip fixture that decodes `payload` and then fails.
///
/// A complete valid member is followed by a second member whose header is
/// intact but whose deflate body opens with a reserved block type, so the
/// decoder errors after the valid bytes have been produced.
pub fn write_corrupt_gzip_fixture(path: &Path, payload: &[u8]) -> io::Result<()> {
    let mut bytes = Vec::new();
    {
        let mut enc = GzEncoder::new(&mut bytes, Compression::default());
        enc.write_all(payload)?;
        enc.finish()?;
    }
    // Second member: CM=8, no flags, zero mtime, unknown OS...
    bytes.extend_from_slice(&[0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0xff]);
    // ...then BFINAL=1 with the reserved BTYPE=11.
    bytes.extend_from_slice(&[0xff; 16]);
    std::fs::write(path, bytes)
}

/// Write the lying zip fixture: a truthful stored entry followed by a
/// stored entry whose declared uncompressed size is [`LYING_DECLARED_SIZE`].
pub fn write_lying_zip_fixture(path: &Path) -> io::Result<()> {
    let filler = vec![FILLER_BYTE; FILLER_ENTRY_LEN];
    let overflow = vec![FILLER_BYTE + 1; OVERFLOW_ENTRY_LEN];
    let entries = [
        ZipFixtureEntry {
            name: FILLER_ENTRY_NAME,
            data: &filler,
            declared_size: FILLER_ENTRY_LEN as u32,
        },
        ZipFixtureEntry {
            name: OVERFLOW_ENTRY_NAME,
            data: &overflow,
            declared_size: LYING_DECLARED_SIZE,
        },
    ];
    std::fs::write(path, build_zip(&entries))
}

struct ZipFixtureEntry<'a> {
    name: &'a [u8],
    data: &'a [u8],
    declared_size: u32,
}

fn build_zip(entries: &[ZipFixtureEntry<'_>]) -> Vec<u8> {
    let mut archive = Vec::new();
    let mut offsets = Vec::with_capacity(entries.len());

    for entry in entries {
        offsets.push(archive.len() as u32);
        push_local_header(&mut archive, entry);
        archive.extend_from_slice(entry.data);
    }

    let cd_offset = archive.len() as u32;
    for (entry, &offset) in entries.iter().zip(&offsets) {
        push_central_header(&mut archive, entry, offset);
    }
    let cd_size = archive.len() as u32 - cd_offset;

    // End of central directory.
    archive.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    archive.extend_from_slice(&0u16.to_le_bytes()); // disk number
    archive.extend_from_slice(&0u16.to_le_bytes()); // central directory disk
    archive.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    archive.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    archive.extend_from_slice(&cd_size.to_le_bytes());
    archive.extend_from_slice(&cd_offset.to_le_bytes());
    archive.extend_from_slice(&0u16.to_le_bytes()); // comment length
    archive
}

fn push_local_header(out: &mut Vec<u8>, entry: &ZipFixtureEntry<'_>) {
    out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // minimum version
    out.extend_from_slice(&0u16.to_le_bytes()); // general purpose flags
    out.extend_from_slice(&0u16.to_le_bytes()); // method: stored
    out.extend_from_slice(&0u16.to_le_bytes()); // modification time
    out.extend_from_slice(&0u16.to_le_bytes()); // modification date
    out.extend_from_slice(&crc32fast::hash(entry.data).to_le_bytes());
    out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
    out.extend_from_slice(&entry.declared_size.to_le_bytes());
    out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // extra field length
    out.extend_from_slice(entry.name);
}

fn push_central_header(out: &mut Vec<u8>, entry: &ZipFixtureEntry<'_>, lfh_offset: u32) {
    out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // created-with version
    out.extend_from_slice(&0u16.to_le_bytes()); // required version
    out.extend_from_slice(&0u16.to_le_bytes()); // general purpose flags
    out.extend_from_slice(&0u16.to_le_bytes()); // method: stored
    out.extend_from_slice(&0u16.to_le_bytes()); // modification time
    out.extend_from_slice(&0u16.to_le_bytes()); // modification date
    out.extend_from_slice(&crc32fast::hash(entry.data).to_le_bytes());
    out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
    out.extend_from_slice(&entry.declared_size.to_le_bytes());
    out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // extra field length
    out.extend_from_slice(&0u16.to_le_bytes()); // comment length
    out.extend_from_slice(&0u16.to_le_bytes()); // disk number
    out.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
    out.extend_from_slice(&0u32.to_le_bytes()); // external attributes
    out.extend_from_slice(&lfh_offset.to_le_bytes());
    out.extend_from_slice(entry.name);
}
