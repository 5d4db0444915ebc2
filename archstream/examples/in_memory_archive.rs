//! Builds a small archive from in-memory buffers and writes it to disk.
//!
//! Run with: `cargo run --example in_memory_archive`.

use archstream::{zip_entry, zip_stream, DeduplicationPolicy};
use archstream_domain::value_objects::CompressionMethod;
use archstream_domain::{BufferSource, ChunkSource};
use tokio::io::AsyncWriteExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let entries = vec![
        zip_entry("readme.txt", BufferSource::new(b"hello archive".to_vec())),
        zip_entry("readme.txt", BufferSource::new(b"a second file, same name".to_vec())),
        zip_entry("data.bin", BufferSource::new(vec![0u8; 4096])),
    ];

    let mut archive = zip_stream(entries, DeduplicationPolicy::default(), CompressionMethod::Deflate);

    let mut output = tokio::fs::File::create("demo.zip").await?;
    while let Some(chunk) = archive.next_chunk().await? {
        output.write_all(&chunk).await?;
    }
    output.flush().await?;

    println!("wrote demo.zip");
    Ok(())
}
