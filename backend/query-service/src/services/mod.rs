/// Business logic layer
pub mod enrichment;
pub mod features;
pub mod presign;

pub use enrichment::EnrichmentPipeline;
pub use features::{FeatureSource, FeatureStore};
pub use presign::{ObjectUrlSigner, PresignedUrlIssuer};
