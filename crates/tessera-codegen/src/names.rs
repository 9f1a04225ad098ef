//! Naming rules for the generated Ruby source. All functions are pure; the
//! same input always maps to the same identifier.

/// Base class of every generated struct class that has no explicit base.
pub const STRUCT_BASE: &str = "Struct";

/// Convert a type name to a PascalCase class identifier.
pub fn class_name(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a member or value name to a snake_case property identifier.
/// Runs of capitals are kept as one word, so `RED` becomes `red` and
/// `GuestOs` becomes `guest_os`.
pub fn member_name(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len());

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '-' || ch == ' ' {
            result.push('_');
            continue;
        }
        if ch.is_uppercase() {
            let after_lower = i > 0 && chars[i - 1].is_lowercase();
            let before_lower = i > 0
                && chars[i - 1].is_uppercase()
                && chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if after_lower || before_lower {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }

    result
}

/// Convert a value name to a SCREAMING_SNAKE constant identifier.
pub fn constant_name(s: &str) -> String {
    member_name(s).to_uppercase()
}

/// Relative output path for a namespace: `::` components become path
/// components, lowercased, so `MySdk::V4` maps to `mysdk/v4`.
pub fn module_path(namespace: &str) -> String {
    namespace
        .split("::")
        .map(|component| component.to_lowercase())
        .collect::<Vec<_>>()
        .join("/")
}
