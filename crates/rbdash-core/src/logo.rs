//! Logo URI normalization

const S3_SCHEME: &str = "s3://";

/// Convert a stored logo reference into a URL a client can fetch.
///
/// - `None` or `""` → `None`
/// - `s3://bucket/path/to/key` → `https://bucket.s3.amazonaws.com/path/to/key`
/// - anything else is returned unchanged
///
/// Only the first path segment is taken as the bucket; the rest of the key is
/// kept as-is, including any further `/` separators. Malformed S3 references
/// produce a degenerate URL rather than an error.
pub fn normalize_logo_url(uri: Option<&str>) -> Option<String> {
    let uri = uri.filter(|s| !s.is_empty())?;

    match uri.strip_prefix(S3_SCHEME) {
        Some(rest) => {
            let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
            Some(format!("https://{bucket}.s3.amazonaws.com/{key}"))
        }
        None => Some(uri.to_string()),
    }
}
