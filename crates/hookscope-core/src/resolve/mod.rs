pub mod files;
pub mod range;

pub use files::FileSetAggregator;
pub use range::RangeResolver;
