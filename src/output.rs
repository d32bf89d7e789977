/// Numbered PNG files, one directory per stream.
pub mod png_dir;
/// Sink contract and the in-memory sink.
pub mod sink;
