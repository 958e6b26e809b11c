use reqwest::Url;

/// Appends path segments to a base URL, percent-encoding each segment.
/// A trailing slash on the base is ignored.
pub fn join(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
