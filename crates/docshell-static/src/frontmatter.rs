//! Front matter stripping.
//!
//! Pages never parse front matter; the browser drops it before handing the
//! Markdown to the renderer. [`strip_front_matter`] is the same rule in Rust,
//! and [`FRONT_MATTER_PATTERN`] is the regex embedded in the page script.

/// Delimiter line opening and closing a front matter block.
pub const FENCE: &str = "---";

/// JavaScript regex literal equivalent to [`strip_front_matter`].
pub const FRONT_MATTER_PATTERN: &str = r"/^---\r?\n(?:[\s\S]*?\r?\n)?---(?:\r?\n|$)/";

/// Remove a leading `---` delimited block.
///
/// The block must open on the very first line. Text without a closing
/// delimiter line is returned unchanged.
pub fn strip_front_matter(source: &str) -> &str {
    let Some(body) = after_fence_line(source) else {
        return source;
    };

    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            return &body[offset + line.len()..];
        }
        offset += line.len();
    }

    source
}

fn after_fence_line(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(FENCE)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_block() {
        assert_eq!(strip_front_matter("---\nkey: val\n---\ncontent"), "content");
    }

    #[test]
    fn keeps_blank_line_after_block() {
        assert_eq!(
            strip_front_matter("---\ntitle: Grid\n---\n\n# Grid\n"),
            "\n# Grid\n"
        );
    }

    #[test]
    fn strips_empty_block() {
        assert_eq!(strip_front_matter("---\n---\nbody"), "body");
    }

    #[test]
    fn strips_block_at_end_of_input() {
        assert_eq!(strip_front_matter("---\ntitle: Only\n---"), "");
    }

    #[test]
    fn handles_crlf() {
        assert_eq!(strip_front_matter("---\r\na: b\r\n---\r\ntext"), "text");
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter here.";

        assert_eq!(strip_front_matter(source), source);
    }

    #[test]
    fn leaves_unclosed_block_alone() {
        let source = "---\ntitle: Test\n# No closing";

        assert_eq!(strip_front_matter(source), source);
    }

    #[test]
    fn ignores_block_not_on_first_line() {
        let source = "\n---\na: b\n---\ntext";

        assert_eq!(strip_front_matter(source), source);
    }

    #[test]
    fn longer_rules_are_not_delimiters() {
        let source = "---\na: b\n----\ntext";

        assert_eq!(strip_front_matter(source), source);
    }
}
