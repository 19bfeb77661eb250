//! Cosmetic image filters expressed as query parameters.
//!
//! The image server does the actual processing; locally a filter is only a
//! suffix on the image URL. Filters chain additively and are never
//! de-duplicated, so blurring twice yields `?blur=10&blur=10`.

/// Blur radius used when nothing else is configured
pub const DEFAULT_BLUR_RADIUS: u8 = 10;

/// Largest blur radius the image server accepts
pub const MAX_BLUR_RADIUS: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Blur(u8),
    Grayscale,
}

impl Filter {
    pub fn query_fragment(&self) -> String {
        match self {
            Filter::Blur(radius) => format!("blur={}", radius),
            Filter::Grayscale => "grayscale".to_string(),
        }
    }

    /// Past-tense verb for status messages
    pub fn verb(&self) -> &'static str {
        match self {
            Filter::Blur(_) => "blurred",
            Filter::Grayscale => "grayscaled",
        }
    }
}

pub fn clamp_blur_radius(radius: u8) -> u8 {
    radius.clamp(1, MAX_BLUR_RADIUS)
}

/// Appends `filter` to `url`, joining with `&` when a query string exists.
pub fn append_filter(url: &str, filter: Filter) -> String {
    let joiner = if has_query(url) { '&' } else { '?' };
    format!("{}{}{}", url, joiner, filter.query_fragment())
}

fn has_query(url: &str) -> bool {
    url.contains('?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_filter_opens_query() {
        assert_eq!(append_filter("http://x/a1", Filter::Blur(10)), "http://x/a1?blur=10");
        assert_eq!(append_filter("http://x/a1", Filter::Grayscale), "http://x/a1?grayscale");
    }

    #[test]
    fn test_second_filter_joins_with_ampersand() {
        let blurred = append_filter("http://x/a1", Filter::Blur(10));
        assert_eq!(
            append_filter(&blurred, Filter::Grayscale),
            "http://x/a1?blur=10&grayscale"
        );

        let gray = append_filter("http://x/a1", Filter::Grayscale);
        assert_eq!(append_filter(&gray, Filter::Blur(10)), "http://x/a1?grayscale&blur=10");
    }

    #[test]
    fn test_repeated_filter_is_not_deduplicated() {
        let once = append_filter("http://x/a1", Filter::Blur(10));
        let twice = append_filter(&once, Filter::Blur(10));
        assert_eq!(twice, "http://x/a1?blur=10&blur=10");
    }

    #[test]
    fn test_existing_query_string() {
        assert_eq!(
            append_filter("https://picsum.photos/200?random=1", Filter::Grayscale),
            "https://picsum.photos/200?random=1&grayscale"
        );
    }

    #[test]
    fn test_clamp_blur_radius() {
        assert_eq!(clamp_blur_radius(0), 1);
        assert_eq!(clamp_blur_radius(5), 5);
        assert_eq!(clamp_blur_radius(200), MAX_BLUR_RADIUS);
    }
}
