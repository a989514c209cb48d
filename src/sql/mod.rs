//! SQL fragments: identifiers come from fixed allow-lists only, values are always bound.

mod order;
pub use order::{MovieOrder, SortColumn, SortDirection, SortQuery};

/// Build an `ILIKE` pattern that matches `fragment` as a literal substring.
/// `\`, `%` and `_` are escaped (PostgreSQL's default LIKE escape is `\`).
pub fn contains_pattern(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len() + 2);
    out.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

pub(crate) const ACTOR_COLUMNS: &str = "id, name, sex, birthday";
pub(crate) const MOVIE_COLUMNS: &str = "id, title, description, date_of_issue, rating";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_fragment() {
        assert_eq!(contains_pattern("incep"), "%incep%");
        assert_eq!(contains_pattern(""), "%%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\x"), "%c:\\\\x%");
    }
}
