pub mod buckets;
pub mod math;
pub mod range;

pub use buckets::{generate_buckets, shift_buckets, ShiftDirection};
pub use range::{classify, Range, RangeKind};
