//! Tab-key indentation for plain-text editing.
//!
//! Library API for editors that embed the synchronizer and own the text
//! buffer; the `postview` binary edits nothing and never calls it.

use std::ops::Range;

/// Inserted in place of a Tab key press.
pub const INDENT: &str = "    ";

/// Result of [`insert_indent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentEdit {
    pub text: String,
    /// Byte offset of the cursor, directly after the inserted indent.
    pub cursor: usize,
}

/// Replace the selected byte range of `text` with [`INDENT`].
///
/// Offsets past the end or inside a multi-byte character are moved back to
/// the nearest character boundary; a reversed range collapses to its start.
pub fn insert_indent(text: &str, selection: Range<usize>) -> IndentEdit {
    let start = floor_boundary(text, selection.start);
    let end = floor_boundary(text, selection.end).max(start);

    let mut out = String::with_capacity(text.len() - (end - start) + INDENT.len());
    out.push_str(&text[..start]);
    out.push_str(INDENT);
    out.push_str(&text[end..]);

    IndentEdit {
        text: out,
        cursor: start + INDENT.len(),
    }
}

fn floor_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_at_cursor() {
        let edit = insert_indent("ab", 1..1);
        assert_eq!(edit.text, "a    b");
        assert_eq!(edit.cursor, 5);
    }

    #[test]
    fn test_indent_replaces_selection() {
        let edit = insert_indent("fn main() {}", 2..7);
        assert_eq!(edit.text, "fn    () {}");
        assert_eq!(edit.cursor, 6);
    }

    #[test]
    fn test_indent_clamps_out_of_range_and_mid_char_offsets() {
        let edit = insert_indent("é", 1..9);
        assert_eq!(edit.text, "    ");
        assert_eq!(edit.cursor, 4);

        let edit = insert_indent("xyz", 2..1);
        assert_eq!(edit.text, "xy    z");
        assert_eq!(edit.cursor, 6);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cursor_lands_after_indent(
                text in ".{0,40}",
                start in 0..64usize,
                end in 0..64usize,
            ) {
                let edit = insert_indent(&text, start..end);
                prop_assert!(edit.text.is_char_boundary(edit.cursor));
                prop_assert_eq!(&edit.text[edit.cursor - INDENT.len()..edit.cursor], INDENT);
                prop_assert!(edit.text.len() <= text.len() + INDENT.len());
            }
        }
    }
}
