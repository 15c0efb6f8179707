mod nuextract;

pub use nuextract::NuExtractModel;
