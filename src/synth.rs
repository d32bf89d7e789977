/// Pure frame planning: segment frame counts, interpolation and display text.
pub mod plan;
/// Rendering planned frames and emitting them to a sink.
pub mod synthesizer;
