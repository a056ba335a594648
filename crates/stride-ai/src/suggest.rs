//! Parser for turning a model reply into a list of suggestion titles.
//!
//! Models answer list prompts in whatever shape they feel like: numbered
//! lists, bullet points, or bare lines, often with markdown emphasis and a
//! chatty preamble. This extracts the items and nothing else.

/// Maximum number of suggestions returned from a single reply.
const MAX_SUGGESTIONS: usize = 10;

/// Maximum length of a single suggestion title.
const MAX_TITLE_LEN: usize = 120;

/// Parse a model reply into suggestion titles.
///
/// Supports the following formats:
/// - Numbered lists: `1. Title` or `1) Title`
/// - Bullet points: `- Title` or `* Title`
/// - Bare lines (fallback, preamble lines ending in ':' are dropped)
pub fn parse_suggestions(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // Try each parser in order of specificity
    let items = collect_items(trimmed, is_numbered_item, strip_numbered);
    if !items.is_empty() {
        return items;
    }

    let items = collect_items(trimmed, is_bullet_item, strip_bullet);
    if !items.is_empty() {
        return items;
    }

    // Fallback: every non-empty line that isn't a preamble
    trimmed
        .lines()
        .map(clean_title)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn collect_items(
    input: &str,
    matches: fn(&str) -> bool,
    strip: fn(&str) -> &str,
) -> Vec<String> {
    input
        .lines()
        .map(str::trim_start)
        .filter(|line| matches(line))
        .map(|line| clean_title(strip(line)))
        .filter(|title| !title.is_empty())
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn is_numbered_item(line: &str) -> bool {
    let mut chars = line.chars();
    // Must start with one or more digits
    let first = chars.next();
    if !first.map_or(false, |c| c.is_ascii_digit()) {
        return false;
    }
    for c in chars.by_ref() {
        if c == '.' || c == ')' {
            // Must be followed by a space
            return chars.next().map_or(false, |c| c == ' ');
        }
        if !c.is_ascii_digit() {
            return false;
        }
    }
    false
}

fn is_bullet_item(line: &str) -> bool {
    (line.starts_with("- ") || line.starts_with("* ")) && line.len() > 2
}

fn strip_numbered(line: &str) -> &str {
    // Strip "N. " or "N) " prefix
    let title_start = line.find(|c: char| c == '.' || c == ')').unwrap_or(0) + 1;
    line[title_start..].trim()
}

fn strip_bullet(line: &str) -> &str {
    line[2..].trim()
}

/// Strip markdown emphasis and surrounding quotes, truncate to title length.
fn clean_title(s: &str) -> String {
    let s = s
        .trim()
        .trim_matches(|c| c == '*' || c == '_' || c == '"' || c == '\'' || c == '`')
        .trim();
    if s.len() <= MAX_TITLE_LEN {
        return s.to_string();
    }
    // Back off to a char boundary, then find a word break near the limit
    let mut cut = MAX_TITLE_LEN;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    let boundary = s[..cut].rfind(' ').unwrap_or(cut);
    format!("{}...", &s[..boundary])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_list() {
        let input = "Here are some goals:\n1. Run a half marathon\n2. Read 12 books\n3) Learn Rust";
        let items = parse_suggestions(input);
        assert_eq!(items, vec!["Run a half marathon", "Read 12 books", "Learn Rust"]);
    }

    #[test]
    fn test_bullet_list() {
        let input = "- Ship the onboarding flow\n- Fix the login crash\n* Write release notes";
        let items = parse_suggestions(input);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], "Ship the onboarding flow");
        assert_eq!(items[2], "Write release notes");
    }

    #[test]
    fn test_markdown_emphasis_stripped() {
        let input = "1. **Run a half marathon**\n2. *Read 12 books*";
        let items = parse_suggestions(input);
        assert_eq!(items, vec!["Run a half marathon", "Read 12 books"]);
    }

    #[test]
    fn test_bare_lines_fallback() {
        let input = "Some suggestions:\nRun a half marathon\nRead 12 books";
        let items = parse_suggestions(input);
        assert_eq!(items, vec!["Run a half marathon", "Read 12 books"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_suggestions("").is_empty());
        assert!(parse_suggestions("   \n  ").is_empty());
    }

    #[test]
    fn test_caps_at_ten() {
        let input = (1..=15)
            .map(|i| format!("{}. Item {}", i, i))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse_suggestions(&input).len(), 10);
    }

    #[test]
    fn test_long_title_truncation() {
        let long = "word ".repeat(50);
        let input = format!("- {}\n- Short item", long.trim());
        let items = parse_suggestions(&input);
        assert_eq!(items.len(), 2);
        assert!(items[0].len() <= MAX_TITLE_LEN + 3);
        assert!(items[0].ends_with("..."));
    }

    #[test]
    fn test_multibyte_title_truncation() {
        let input = format!("- ab{}", "日".repeat(50));
        let items = parse_suggestions(&input);
        assert_eq!(items.len(), 1);
        assert!(items[0].ends_with("..."));
        assert!(items[0].len() <= MAX_TITLE_LEN + 3);
    }
}
