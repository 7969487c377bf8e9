//! Person name formatting.

/// Formats a person's display name as "last first".
///
/// This is the canonical ordering used in report rows and seeded data.
#[must_use]
pub fn full_name(last_name: &str, first_name: &str) -> String {
    format!("{last_name} {first_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_is_last_first() {
        assert_eq!(full_name("Ivanova", "Anna"), "Ivanova Anna");
    }
}
