//! Case conversion helpers

/// Convert `iron-man` or `sylius_product.plugin` to `IronMan` / `SyliusProductPlugin`
///
/// Word boundaries are non-alphanumeric characters. Characters after the first
/// of each word keep their case, so an already PascalCased string is unchanged.
pub fn pascal_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert `AcmeSyliusExample` to `_acme_sylius_example`
///
/// Every uppercase letter starts a new word, so a PascalCase input yields a
/// leading underscore; callers strip it where they need to.
pub fn snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        if c.is_uppercase() {
            out.push('_');
            out.extend(c.to_lowercase());
        } else if c.is_alphanumeric() {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    // Collapse runs left by separators followed by capitals
    let mut collapsed = String::with_capacity(out.len());
    for c in out.chars() {
        if c == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}
