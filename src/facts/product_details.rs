use super::HttpClient;
use crate::Result;
use crate::catalog::{ProductDetails, ProductVersionMetadata};
use ohno::EnrichableExt;
use url::Url;

const LOG_TARGET: &str = "   product";

/// Fetch and validate the published product version numbers.
pub async fn fetch(http: &HttpClient, url: &Url) -> Result<ProductVersionMetadata> {
    log::info!(target: LOG_TARGET, "Querying product details");

    let details: ProductDetails = http.get_json("product details", url, None).await?;
    let metadata = ProductVersionMetadata::try_from(details).map_err(|e| e.enrich("the product details document is malformed"))?;

    log::debug!(
        target: LOG_TARGET,
        "Product majors: nightly {}, beta {}, release {}, ESR {}",
        metadata.nightly_major(),
        metadata.beta_major(),
        metadata.release_major(),
        metadata.maintenance_major()
    );

    Ok(metadata)
}
