//! Create-and-share helpers
//!
//! Upload pre-checks and share-link building for the create flow. The upload
//! itself happens in the page; this module only decides whether a file may be
//! sent and what link to hand out once the media host returns a URL.

use url::Url;

use crate::constants::MAX_UPLOAD_BYTES;
use crate::error::ShareError;

/// Reject anything that is not an image or is larger than 10 MiB.
pub fn validate_photo_upload(mime: &str, size_bytes: u64) -> Result<(), ShareError> {
    if !mime.starts_with("image/") {
        return Err(ShareError::NotAnImage {
            mime: mime.to_string(),
        });
    }
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ShareError::TooLarge {
            size: size_bytes,
            max: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// `<origin>/?name=<name>&image=<image>`
pub fn build_share_link(origin: &str, name: &str, image: &Url) -> Result<Url, ShareError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ShareError::EmptyName);
    }

    let mut url = Url::parse(origin)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ShareError::UnsupportedScheme(url.scheme().to_string()));
    }
    url.set_path("/");
    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut()
        .append_pair("name", name)
        .append_pair("image", image.as_str());

    tracing::info!(link = %url, "share link built");
    Ok(url)
}
