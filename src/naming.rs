use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static UNSAFE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._\- ]").unwrap());

/// Strip everything but `[A-Za-z0-9._- ]` and cap at `max_len` chars.
pub fn safe_name(raw: &str, max_len: usize) -> String {
    UNSAFE_RE.replace_all(raw, "").chars().take(max_len).collect()
}

/// Stem used for a top-level section's files. Keys that are already safe are
/// kept verbatim so `figma_<key>.json` matches the document key.
pub fn section_stem(key: &str) -> String {
    let cleaned = safe_name(key, usize::MAX);
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "section".to_string()
    } else {
        cleaned
    }
}

/// Stem for the key at 1-based `position`, suffixed with the position when
/// an earlier key already produced the same stem.
pub fn unique_section_stem(key: &str, position: usize, used: &mut HashSet<String>) -> String {
    let mut candidate = section_stem(key);
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}", candidate, position);
    }
    candidate
}

pub fn section_file(stem: &str) -> String {
    format!("figma_{}.json", stem)
}

pub fn chunk_file(stem: &str, group: usize) -> String {
    format!("{}_chunk_{}.json", stem, group)
}

/// File for a single entry of a small oversized mapping. Falls back to the
/// entry position when the key sanitizes to nothing.
pub fn entry_file(entry_key: &str, position: usize, max_len: usize) -> String {
    let name = safe_name(entry_key, max_len);
    if name.trim_matches('.').is_empty() {
        format!("entry_{}.json", position)
    } else {
        format!("{}.json", name)
    }
}

pub fn page_file(index: usize, safe: &str, kind: &str) -> String {
    format!("{:02}_{}_{}.json", index, safe, safe_name(kind, usize::MAX))
}

pub fn page_index_dir(index: usize, safe: &str) -> String {
    format!("page_{:02}_{}_index", index, safe)
}

pub fn component_file(index: usize, safe: &str) -> String {
    format!("component_{:03}_{}.json", index, safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_safe_chars(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
    }

    #[test]
    fn strips_separators_and_punctuation() {
        assert_eq!(safe_name("Icons / Arrows: (v2)", 50), "Icons  Arrows v2");
        assert_eq!(safe_name("a\\b/c", 50), "abc");
        assert_eq!(safe_name("Mobile_v1.2 - draft", 50), "Mobile_v1.2 - draft");
    }

    #[test]
    fn drops_unicode_and_emoji() {
        assert_eq!(safe_name("🎨 Design Système", 50), " Design Systme");
    }

    #[test]
    fn truncates_to_limit() {
        let long = "x".repeat(80);
        assert_eq!(safe_name(&long, 50).len(), 50);
        assert_eq!(safe_name(&long, 30).len(), 30);
        assert_eq!(safe_name("short", 30), "short");
    }

    #[test]
    fn sanitized_names_are_bounded_and_deterministic() {
        let inputs = [
            "",
            "Page 1",
            "../../etc/passwd",
            "名前 with ünïcödé and 🚀🚀🚀",
            "tabs\tand\nnewlines",
            "A-Z.a_z 0-9 ~!@#$%^&*()+={}[]|;:'\",<>?",
        ];
        for input in inputs {
            for max in [0, 1, 30, 50] {
                let out = safe_name(input, max);
                assert!(only_safe_chars(&out), "{:?} -> {:?}", input, out);
                assert!(out.chars().count() <= max);
                assert_eq!(out, safe_name(input, max));
            }
        }
    }

    #[test]
    fn section_stems_keep_plain_keys() {
        assert_eq!(section_stem("document"), "document");
        assert_eq!(section_stem("componentSets"), "componentSets");
        assert_eq!(section_stem("../evil"), "..evil");
        assert_eq!(section_stem(".."), "section");
        assert_eq!(section_file("document"), "figma_document.json");
        assert_eq!(chunk_file("styles", 3), "styles_chunk_3.json");
    }

    #[test]
    fn colliding_section_stems_get_position_suffix() {
        let mut used = HashSet::new();
        assert_eq!(unique_section_stem("ab", 1, &mut used), "ab");
        assert_eq!(unique_section_stem("a/b", 2, &mut used), "ab_2");
        assert_eq!(unique_section_stem("ab_2", 3, &mut used), "ab_2_3");
        assert_eq!(unique_section_stem("styles", 4, &mut used), "styles");
    }

    #[test]
    fn entry_file_falls_back_on_empty_name() {
        assert_eq!(entry_file("1:23 Button", 1, 50), "123 Button.json");
        assert_eq!(entry_file("🚀", 4, 50), "entry_4.json");
        assert_eq!(entry_file("..", 2, 50), "entry_2.json");
    }

    #[test]
    fn page_and_component_files_are_zero_padded() {
        assert_eq!(page_file(3, "Cover", "CANVAS"), "03_Cover_CANVAS.json");
        assert_eq!(page_file(12, "Icons", "CANVAS"), "12_Icons_CANVAS.json");
        assert_eq!(page_index_dir(7, "Forms"), "page_07_Forms_index");
        assert_eq!(component_file(5, "Button"), "component_005_Button.json");
    }
}
