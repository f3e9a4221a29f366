use std::path::Path;

/// Accessible label used for the synthetic slide shown when no promo images exist.
pub const PLACEHOLDER_LABEL: &str = "Photo booth";

/// Turns a file name such as `summer_sale-2024.jpg` into `summer sale 2024`.
pub fn humanize_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();

    stem.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accessible label for the slide at 0-based `position`.
pub fn slide_label(file_name: &str, position: usize) -> String {
    let name = humanize_file_name(file_name);

    if name.is_empty() {
        format!("Promotional slide {}", position + 1)
    } else {
        format!("Promotional slide: {name}")
    }
}
