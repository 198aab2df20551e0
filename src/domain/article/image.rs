use super::model::{RawImage, RawImageSize};
use super::ImageRef;
use url::Url;

/// Which variant order to use when picking an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageContext {
    /// Lists favour the lightest variant: size1, thumb, size2.
    List,
    /// Hero images favour quality: size2, thumb, size1.
    Hero,
}

/// Resolve `src` against `base` unless it is already absolute.
///
/// Leading slashes are dropped before joining, so the base path is extended
/// rather than replaced by the host root.
pub fn absolutize(src: &str, base: Option<&Url>) -> String {
    if src.is_empty() {
        return String::new();
    }
    if is_absolute(src) {
        return src.to_string();
    }
    let Some(base) = base else {
        return src.to_string();
    };

    match base.join(src.trim_start_matches('/')) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!(src = %src, error = %e, "Leaving unresolvable URL as-is");
            src.to_string()
        }
    }
}

fn is_absolute(src: &str) -> bool {
    let lower = src.get(..8).unwrap_or(src).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Pick the first variant with a non-empty URL in the context's priority order.
pub fn pick_variant(image: &RawImage, context: ImageContext) -> Option<&RawImageSize> {
    let order = match context {
        ImageContext::List => [&image.size1, &image.thumb, &image.size2],
        ImageContext::Hero => [&image.size2, &image.thumb, &image.size1],
    };

    order
        .into_iter()
        .flatten()
        .find(|size| size.url.as_deref().is_some_and(|u| !u.is_empty()))
}

/// Build an [`ImageRef`] from the best variant, if any has a URL.
pub fn resolve_image(
    image: &RawImage,
    context: ImageContext,
    alt: &str,
    base: Option<&Url>,
) -> Option<ImageRef> {
    let size = pick_variant(image, context)?;
    let url = size.url.as_deref()?;

    Some(ImageRef {
        src: absolutize(url, base),
        width: size.width,
        height: size.height,
        alt: alt.to_string(),
    })
}
