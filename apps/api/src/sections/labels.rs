/// Turns a record key into a heading.
///
/// A space goes before every uppercase ASCII letter that is not the first character,
/// then the first character is uppercased: `jobTitle` → `Job Title`,
/// `certifications` → `Certifications`. Underscores are left alone.
pub fn humanize_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    let mut chars = spaced.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
