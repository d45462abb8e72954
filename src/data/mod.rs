mod collection;
mod dataset;
mod metadata;
mod normalisation;
mod source;

pub use collection::DatasetCollection;
pub use dataset::Dataset;
pub use metadata::DatasetMetadata;
pub use normalisation::{ColumnStats, NormalisationMethod};
pub use source::{DatasetRef, DatasetSource, LocalSource};
