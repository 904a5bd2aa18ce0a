use unicode_normalization::UnicodeNormalization;

/// Normalizes text for case- and whitespace-insensitive comparison.
///
/// Applies NFKC, lowercases, then trims. Inner whitespace is left alone so
/// that character offsets inside titles stay meaningful for length ratios.
///
/// ```rust
/// use canonical::normalize;
///
/// assert_eq!(normalize("  Toy Story "), "toy story");
/// assert_eq!(normalize("\u{FB01}lm"), "film");
/// ```
pub fn normalize(text: &str) -> String {
    let composed: String = text.nfkc().collect();
    composed.to_lowercase().trim().to_string()
}

/// Normalizes every element and drops the ones that end up empty.
pub fn normalize_all<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| normalize(item.as_ref()))
        .filter(|item| !item.is_empty())
        .collect()
}
