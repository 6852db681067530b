//! Rust identifiers for per-asset constants.

use rustc_hash::FxHashSet;

use crate::asset::{AssetRecord, AssetTable};

/// Names the generated module defines itself.
const RESERVED: &[&str] = &["ASSETS", "FALLBACK_TOKEN"];

/// `SCREAMING_SNAKE_CASE` constant name for an asset path.
///
/// Runs of non-alphanumeric characters become a single `_`; names that
/// would start with a digit or clash with a reserved name get an `ASSET_`
/// prefix.
///
/// - `/index.html` -> `INDEX_HTML`
/// - `/css/site.min.css` -> `CSS_SITE_MIN_CSS`
/// - `/404.html` -> `ASSET_404_HTML`
pub fn const_name(path: &str) -> String {
    let mut name = String::with_capacity(path.len());
    let mut pending_sep = false;

    for c in path.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !name.is_empty() {
                name.push('_');
            }
            pending_sep = false;
            name.push(c.to_ascii_uppercase());
        } else {
            pending_sep = true;
        }
    }

    if name.is_empty()
        || name.starts_with(|c: char| c.is_ascii_digit())
        || RESERVED.contains(&name.as_str())
    {
        name.insert_str(0, "ASSET_");
    }
    name
}

/// Pair every record with its constant name, in path order.
///
/// A name already taken by an earlier path gets the first free numeric
/// suffix (`JS`, `JS_2`, `JS_3`, ...).
pub fn assign(table: &AssetTable) -> Vec<(&AssetRecord, String)> {
    let mut taken: FxHashSet<String> = FxHashSet::default();
    let mut named = Vec::with_capacity(table.len());

    for record in table.iter() {
        let base = const_name(&record.path);
        let mut ident = base.clone();
        let mut n = 2;
        while taken.contains(&ident) {
            ident = format!("{base}_{n}");
            n += 1;
        }
        taken.insert(ident.clone());
        named.push((record, ident));
    }

    named
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{Fingerprint, compress_bytes};

    #[test]
    fn test_const_name() {
        assert_eq!(const_name("/index.html"), "INDEX_HTML");
        assert_eq!(const_name("/css/site.min.css"), "CSS_SITE_MIN_CSS");
        assert_eq!(const_name("/fonts/Open-Sans.woff2"), "FONTS_OPEN_SANS_WOFF2");
        assert_eq!(const_name("/404.html"), "ASSET_404_HTML");
        assert_eq!(const_name("/assets"), "ASSET_ASSETS");
        assert_eq!(const_name("/--"), "ASSET_");
    }

    fn names(paths: &[&str]) -> Vec<String> {
        let records = paths
            .iter()
            .map(|p| AssetRecord::new(*p, compress_bytes(p.as_bytes()).unwrap()));
        let table = AssetTable::from_records(records, Fingerprint::random()).unwrap();
        assign(&table).into_iter().map(|(_, n)| n).collect()
    }

    #[test]
    fn test_assign_suffixes_clashing_names() {
        assert_eq!(names(&["/a-b.js", "/a_b.js"]), vec!["A_B_JS", "A_B_JS_2"]);
        assert_eq!(names(&["/中文.js", "/日本.js"]), vec!["JS", "JS_2"]);
    }

    #[test]
    fn test_assign_suffix_skips_taken_names() {
        // "/JS-2" sorts first and owns JS_2, so the second "JS" gets JS_3
        assert_eq!(
            names(&["/JS-2", "/js", "/js.."]),
            vec!["JS_2", "JS", "JS_3"]
        );
        assert_eq!(
            names(&["/-js", "/js", "/js_2"]),
            vec!["JS", "JS_2", "JS_2_2"]
        );
    }

    #[test]
    fn test_assign_in_path_order() {
        assert_eq!(names(&["/b.css", "/a.js"]), vec!["A_JS", "B_CSS"]);
    }
}
