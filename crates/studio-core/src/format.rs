#![forbid(unsafe_code)]

//! Text formatting for rendered values.

/// Format an integer with en-US thousands separators: `1234567` → `"1,234,567"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Tab keys whose labels are not a plain title-casing of the key.
const TAB_LABEL_OVERRIDES: &[(&str, &str)] = &[
    ("father-mother-70-years", "Father & Mother (70 Years)"),
    ("sons-and-grandchildren", "Sons & Grandchildren"),
    ("sons-photoshoot", "Sons' Photoshoot"),
];

/// Human-readable label for a gallery tab key.
///
/// Keys without an override are split on `-` and each word gets an
/// uppercase first letter: `"pre-wedding"` → `"Pre Wedding"`.
pub fn tab_label(key: &str) -> String {
    if let Some((_, label)) = TAB_LABEL_OVERRIDES.iter().find(|(k, _)| *k == key) {
        return (*label).to_owned();
    }
    key.split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(2500), "2,500");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(123456), "123,456");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn groups_negative() {
        assert_eq!(group_thousands(-1500), "-1,500");
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn generic_labels() {
        assert_eq!(tab_label("pre-wedding"), "Pre Wedding");
        assert_eq!(tab_label("engagement"), "Engagement");
        assert_eq!(tab_label("highlights"), "Highlights");
    }

    #[test]
    fn override_labels() {
        assert_eq!(tab_label("sons-photoshoot"), "Sons' Photoshoot");
        assert_eq!(tab_label("sons-and-grandchildren"), "Sons & Grandchildren");
        assert_eq!(tab_label("father-mother-70-years"), "Father & Mother (70 Years)");
    }

    #[test]
    fn empty_segments_survive() {
        assert_eq!(tab_label("a--b"), "A  B");
        assert_eq!(tab_label(""), "");
    }
}
