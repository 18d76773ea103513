//! Identifier conversions for generated Go code.

/// Converts a SQL name into an exported Go identifier.
///
/// Words are split on anything that is not alphanumeric. An all-caps word
/// is folded to `Title` case (`ID` → `Id`); other words keep their inner
/// casing (`userId` → `UserId`).
#[must_use]
pub fn exported_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for word in name.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let fold = !word.chars().any(char::is_lowercase);
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            if fold {
                out.push_str(&chars.as_str().to_lowercase());
            } else {
                out.push_str(chars.as_str());
            }
        }
    }
    if out.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        out.insert(0, 'X');
    }
    out
}

/// Converts a SQL name into `snake_case` for serialization tags.
#[must_use]
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut after_lower = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() && after_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            after_lower = c.is_lowercase() || c.is_ascii_digit();
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            after_lower = false;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Name of the constant for one enum value: `Role` + `admin` → `Role_Admin`.
#[must_use]
pub fn enum_member_name(enum_type: &str, value: &str) -> String {
    let member = exported_name(value);
    // strip the leading-digit guard
    let member = if value.starts_with(|c: char| c.is_ascii_digit()) {
        &member[1..]
    } else {
        &member[..]
    };
    format!("{enum_type}_{member}")
}
