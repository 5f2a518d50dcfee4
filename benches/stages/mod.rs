//! Benchmarks for the individual processing stages.

mod load;
mod rescale;
mod roll;

pub use load::bench_load;
pub use rescale::bench_rescale;
pub use roll::bench_roll;
