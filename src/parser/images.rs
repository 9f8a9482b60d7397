use scraper::{ElementRef, Selector};
use url::Url;

use super::urls::{is_trusted, resolve};
use crate::record::ImageDescriptor;

const STEM_SECTION: &str = "stem";

/// Images in the question block that are hosted on `trusted_domain`, in document order.
pub fn collect_images(
    block: ElementRef,
    img_sel: &Selector,
    base_url: &Url,
    trusted_domain: &str,
) -> Vec<ImageDescriptor> {
    block
        .select(img_sel)
        .filter_map(|img| {
            let v = img.value();
            let url = resolve(base_url, v.attr("src")?)?;
            if !is_trusted(&url, trusted_domain) {
                return None;
            }
            Some((String::from(url), v.attr("alt"), v.attr("title")))
        })
        .enumerate()
        .map(|(i, (url, alt, title))| ImageDescriptor {
            url,
            question_section: STEM_SECTION,
            order_index: i,
            alt_text: alt.unwrap_or_default().trim().to_string(),
            caption: title.unwrap_or_default().trim().to_string(),
        })
        .collect()
}
