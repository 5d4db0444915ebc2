// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # ZIP Byte Layout
//!
//! Pure, allocation-only functions that render the fixed-format pieces of a
//! streamed ZIP archive: local file headers, data descriptors,
//! central-directory records, and the end-of-central-directory block (with
//! its ZIP64 extension). Nothing in this module performs I/O or touches a
//! compressor - it only knows how to turn already-computed sizes and CRCs
//! into bytes.

use archstream_domain::value_objects::CompressionMethod;
use archstream_domain::CentralDirectoryRecord;

pub const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x0403_4b50;
pub const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x0807_4b50;
pub const CENTRAL_FILE_HEADER_SIGNATURE: u32 = 0x0201_4b50;
pub const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0605_4b50;
pub const ZIP64_END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x0606_4b50;
pub const ZIP64_EOCD_LOCATOR_SIGNATURE: u32 = 0x0706_4b50;
pub const ZIP64_EXTRA_FIELD_TAG: u16 = 0x0001;

/// Any size or offset at or beyond this value requires the ZIP64 extension;
/// `0xFFFFFFFF` itself is reserved as the ZIP64 sentinel, so the cutover
/// happens one value earlier.
pub const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFE;
pub const ZIP64_ENTRY_COUNT_THRESHOLD: u16 = 0xFFFE;

/// General-purpose bit flag: bit 3 (data descriptor follows) and bit 11
/// (name/comment are UTF-8), the only two bits this encoder ever sets.
pub const GENERAL_PURPOSE_FLAGS: u16 = (1 << 3) | (1 << 11);

/// A fixed DOS time/date pair standing in for 1980-01-01 00:00:00, the
/// earliest representable DOS timestamp. The encoder has no wall-clock
/// dependency, so every entry carries this placeholder.
pub const DOS_TIME: u16 = 0;
pub const DOS_DATE: u16 = 0b0000_0000_0010_0001; // day 1, month 1, year 0 (=1980)

fn version_needed(requires_zip64: bool) -> u16 {
    if requires_zip64 {
        45
    } else {
        20
    }
}

/// Renders a local file header for `name`, sized and flagged for streamed
/// (data-descriptor-terminated) output. Sizes and CRC are always zero here;
/// they are only known once the payload has been fully read, hence the data
/// descriptor that follows the payload.
pub fn local_file_header(name: &str, method: CompressionMethod) -> Vec<u8> {
    let name_bytes = name.as_bytes();
    let mut out = Vec::with_capacity(30 + name_bytes.len());
    out.extend_from_slice(&LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes());
    out.extend_from_slice(&version_needed(false).to_le_bytes());
    out.extend_from_slice(&GENERAL_PURPOSE_FLAGS.to_le_bytes());
    out.extend_from_slice(&method.code().to_le_bytes());
    out.extend_from_slice(&DOS_TIME.to_le_bytes());
    out.extend_from_slice(&DOS_DATE.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // crc-32
    out.extend_from_slice(&0u32.to_le_bytes()); // compressed size
    out.extend_from_slice(&0u32.to_le_bytes()); // uncompressed size
    out.extend_from_slice(&(name_bytes.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // extra field length
    out.extend_from_slice(name_bytes);
    out
}

/// Renders a data descriptor. Uses the 8-byte-size ZIP64 form when either
/// size requires it, matching what the local header for this entry would
/// have needed had sizes been known upfront.
pub fn data_descriptor(crc32: u32, compressed_size: u64, uncompressed_size: u64) -> Vec<u8> {
    let requires_zip64 = compressed_size >= ZIP64_THRESHOLD || uncompressed_size >= ZIP64_THRESHOLD;
    let mut out = Vec::with_capacity(if requires_zip64 { 24 } else { 16 });
    out.extend_from_slice(&DATA_DESCRIPTOR_SIGNATURE.to_le_bytes());
    out.extend_from_slice(&crc32.to_le_bytes());
    if requires_zip64 {
        out.extend_from_slice(&compressed_size.to_le_bytes());
        out.extend_from_slice(&uncompressed_size.to_le_bytes());
    } else {
        out.extend_from_slice(&(compressed_size as u32).to_le_bytes());
        out.extend_from_slice(&(uncompressed_size as u32).to_le_bytes());
    }
    out
}

/// Renders one central-directory file header for an already-written entry.
/// Fields exceeding 32 bits are sentinel-filled with `0xFFFFFFFF` and carried
/// instead in a ZIP64 extra field.
pub fn central_file_header(record: &CentralDirectoryRecord) -> Vec<u8> {
    let name_bytes = record.name.as_bytes();
    let requires_zip64 = record.requires_zip64();

    let mut zip64_extra = Vec::new();
    if record.uncompressed_size >= ZIP64_THRESHOLD {
        zip64_extra.extend_from_slice(&record.uncompressed_size.to_le_bytes());
    }
    if record.compressed_size >= ZIP64_THRESHOLD {
        zip64_extra.extend_from_slice(&record.compressed_size.to_le_bytes());
    }
    if record.local_header_offset >= ZIP64_THRESHOLD {
        zip64_extra.extend_from_slice(&record.local_header_offset.to_le_bytes());
    }
    let mut extra_field = Vec::new();
    if !zip64_extra.is_empty() {
        extra_field.extend_from_slice(&ZIP64_EXTRA_FIELD_TAG.to_le_bytes());
        extra_field.extend_from_slice(&(zip64_extra.len() as u16).to_le_bytes());
        extra_field.extend_from_slice(&zip64_extra);
    }

    let sentinel_or = |value: u64| -> u32 {
        if value >= ZIP64_THRESHOLD {
            u32::MAX
        } else {
            value as u32
        }
    };

    let mut out = Vec::with_capacity(46 + name_bytes.len() + extra_field.len());
    out.extend_from_slice(&CENTRAL_FILE_HEADER_SIGNATURE.to_le_bytes());
    out.extend_from_slice(&version_needed(requires_zip64).to_le_bytes()); // version made by
    out.extend_from_slice(&version_needed(requires_zip64).to_le_bytes()); // version needed
    out.extend_from_slice(&GENERAL_PURPOSE_FLAGS.to_le_bytes());
    out.extend_from_slice(&record.method.code().to_le_bytes());
    out.extend_from_slice(&record.dos_time.to_le_bytes());
    out.extend_from_slice(&record.dos_date.to_le_bytes());
    out.extend_from_slice(&record.crc32.to_le_bytes());
    out.extend_from_slice(&sentinel_or(record.compressed_size).to_le_bytes());
    out.extend_from_slice(&sentinel_or(record.uncompressed_size).to_le_bytes());
    out.extend_from_slice(&(name_bytes.len() as u16).to_le_bytes());
    out.extend_from_slice(&(extra_field.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // comment length
    out.extend_from_slice(&0u16.to_le_bytes()); // disk number start
    out.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
    out.extend_from_slice(&0u32.to_le_bytes()); // external attributes
    out.extend_from_slice(&sentinel_or(record.local_header_offset).to_le_bytes());
    out.extend_from_slice(name_bytes);
    out.extend_from_slice(&extra_field);
    out
}

/// Renders the end-of-central-directory tail: a ZIP64 EOCD record + locator
/// when `requires_zip64` (any record needed it, or the entry count overflows
/// 16 bits), followed unconditionally by the classic EOCD record.
pub fn end_of_central_directory(
    entry_count: usize,
    central_directory_size: u64,
    central_directory_offset: u64,
) -> Vec<u8> {
    let requires_zip64 = entry_count as u64 > ZIP64_ENTRY_COUNT_THRESHOLD as u64
        || central_directory_size >= ZIP64_THRESHOLD
        || central_directory_offset >= ZIP64_THRESHOLD;

    let mut out = Vec::new();

    if requires_zip64 {
        let zip64_eocd_offset = central_directory_offset + central_directory_size;

        // ZIP64 end-of-central-directory record (fixed portion, no extensible
        // data sector).
        out.extend_from_slice(&ZIP64_END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes());
        out.extend_from_slice(&44u64.to_le_bytes()); // size of this record, minus the leading 12 bytes
        out.extend_from_slice(&45u16.to_le_bytes()); // version made by
        out.extend_from_slice(&45u16.to_le_bytes()); // version needed
        out.extend_from_slice(&0u32.to_le_bytes()); // disk number
        out.extend_from_slice(&0u32.to_le_bytes()); // disk with central directory start
        out.extend_from_slice(&(entry_count as u64).to_le_bytes()); // entries on this disk
        out.extend_from_slice(&(entry_count as u64).to_le_bytes()); // total entries
        out.extend_from_slice(&central_directory_size.to_le_bytes());
        out.extend_from_slice(&central_directory_offset.to_le_bytes());

        // ZIP64 end-of-central-directory locator.
        out.extend_from_slice(&ZIP64_EOCD_LOCATOR_SIGNATURE.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // disk with the ZIP64 EOCD record
        out.extend_from_slice(&zip64_eocd_offset.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes()); // total number of disks
    }

    let sentinel_or_16 = |value: usize| -> u16 {
        if value as u64 > ZIP64_ENTRY_COUNT_THRESHOLD as u64 {
            u16::MAX
        } else {
            value as u16
        }
    };
    let sentinel_or_32 = |value: u64| -> u32 {
        if value >= ZIP64_THRESHOLD {
            u32::MAX
        } else {
            value as u32
        }
    };

    out.extend_from_slice(&END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // disk number
    out.extend_from_slice(&0u16.to_le_bytes()); // disk with central directory start
    out.extend_from_slice(&sentinel_or_16(entry_count).to_le_bytes());
    out.extend_from_slice(&sentinel_or_16(entry_count).to_le_bytes());
    out.extend_from_slice(&sentinel_or_32(central_directory_size).to_le_bytes());
    out.extend_from_slice(&sentinel_or_32(central_directory_offset).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // archive comment length
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use archstream_domain::value_objects::CompressionMethod;

    #[test]
    fn local_file_header_starts_with_signature_and_carries_name() {
        let header = local_file_header("a.txt", CompressionMethod::Stored);
        assert_eq!(&header[0..4], &LOCAL_FILE_HEADER_SIGNATURE.to_le_bytes());
        assert_eq!(header.len(), 30 + "a.txt".len());
        assert_eq!(&header[26..28], &5u16.to_le_bytes()); // name length
        assert_eq!(&header[30..], b"a.txt");
    }

    #[test]
    fn data_descriptor_uses_32_bit_form_under_threshold() {
        let dd = data_descriptor(0xDEAD_BEEF, 10, 20);
        assert_eq!(dd.len(), 16);
        assert_eq!(&dd[0..4], &DATA_DESCRIPTOR_SIGNATURE.to_le_bytes());
    }

    #[test]
    fn data_descriptor_uses_64_bit_form_at_threshold() {
        let dd = data_descriptor(0, ZIP64_THRESHOLD, 0);
        assert_eq!(dd.len(), 24);
    }

    #[test]
    fn empty_archive_eocd_has_zero_entries() {
        let eocd = end_of_central_directory(0, 0, 0);
        assert_eq!(&eocd[0..4], &END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes());
        assert_eq!(eocd.len(), 22);
    }

    #[test]
    fn large_entry_count_promotes_to_zip64() {
        let eocd = end_of_central_directory(ZIP64_ENTRY_COUNT_THRESHOLD as usize + 1, 100, 200);
        assert_eq!(&eocd[0..4], &ZIP64_END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes());
    }
}
