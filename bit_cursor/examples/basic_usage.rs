use std::io::{Cursor, SeekFrom};

use bit_cursor::{
    BitArray, BitOrder, BitRead, BitStreamReader, BitStreamWriter, BitWrite, CursorError,
};

fn main() {
    println!("=== Bit Cursor Examples ===\n");

    // Example 1: Packing a header into a buffer
    if let Err(err) = example_packed_header() {
        println!("  failed: {err}");
    }

    // Example 2: Streaming fields through std::io
    if let Err(err) = example_stream_roundtrip() {
        println!("  failed: {err}");
    }

    // Example 3: Patching a field in place
    if let Err(err) = example_patch_in_place() {
        println!("  failed: {err}");
    }
}

fn example_packed_header() -> Result<(), CursorError> {
    println!("Example 1: A 3-byte header (version:3, flags:5, length:12, crc:4)");

    let mut header = BitArray::with_order(vec![0; 3], BitOrder::Msb)?;
    header.write_u8(5, 3)?;
    header.write_u8(0b10011, 5)?;
    header.write_u16(1500, 12)?;
    header.write_u8(0xA, 4)?;

    println!("  Bytes: {:02X?}", header.as_bytes());

    header.set_position(0);
    println!("  Version: {}", header.read_u8(3)?);
    println!("  Flags: {:05b}", header.read_u8(5)?);
    println!("  Length: {}", header.read_u16(12)?);
    println!("  CRC: {:X}", header.read_u8(4)?);
    println!();

    Ok(())
}

fn example_stream_roundtrip() -> Result<(), CursorError> {
    println!("Example 2: Signed deltas, 6 bits each");

    let deltas = [-12i8, 7, 31, -32, 0, 5];

    let mut writer = BitStreamWriter::new(Vec::new());
    for delta in deltas {
        writer.write_i8(delta, 6)?;
    }
    let bytes = writer.into_inner()?;
    println!("  {} values in {} bytes", deltas.len(), bytes.len());

    let mut reader = BitStreamReader::new(bytes.as_slice());
    let decoded = (0..deltas.len())
        .map(|_| reader.read_i8(6))
        .collect::<Result<Vec<_>, _>>()?;
    println!("  Decoded: {decoded:?}");
    println!();

    Ok(())
}

fn example_patch_in_place() -> Result<(), CursorError> {
    println!("Example 3: Rewriting bits 12..20 of an existing stream");

    let stream = Cursor::new(vec![0xFFu8; 4]);
    let mut writer = BitStreamWriter::seekable(stream);
    writer.seek(SeekFrom::Start(12))?;
    writer.write_u8(0, 8)?;

    let bytes = writer.into_inner()?.into_inner();
    println!("  Bytes: {bytes:02X?}");
    println!();

    Ok(())
}
