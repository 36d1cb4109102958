//! Tagged-block scanner for model replies
//!
//! A reply may contain at most one command, written as
//!
//! ```text
//! <write_file>
//!   <path>notes/todo.txt</path>
//!   <content>buy milk</content>
//! </write_file>
//! ```
//!
//! Grammar:
//!
//! ```text
//! block := '<' NAME '>' body '</' NAME '>'    shortest body, same NAME
//! body  := (text | param)*
//! param := '<' NAME '>' value '</' NAME '>'   non-overlapping, left to right
//! NAME  := word characters (alphanumeric or '_'), at least one
//! ```
//!
//! Scanning tries every `<` in order. An open tag with no matching close tag
//! is reported as a [`SkippedTag`] and scanning resumes at the next `<`. Only
//! the first complete block is a command, and only one level below it is
//! read as parameters.

use super::Command;

/// An open tag that never found its matching close tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTag {
    /// Tag name
    pub name: String,
    /// Byte offset of the `<` in the reply
    pub offset: usize,
}

/// Result of scanning one reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// The first complete block, if any
    pub command: Option<Command>,
    /// Unterminated tags passed over while scanning
    pub skipped: Vec<SkippedTag>,
}

/// A complete `<name>body</name>` span
#[derive(Debug, Clone, Copy)]
struct Block<'a> {
    name: &'a str,
    body: &'a str,
    /// Byte offset where the body starts
    body_start: usize,
    /// Byte offset just past the close tag
    end: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Parse `<NAME>` at `pos`, returning the name and the offset past `>`
fn open_tag_at(text: &str, pos: usize) -> Option<(&str, usize)> {
    let rest = text[pos..].strip_prefix('<')?;
    let name_len = rest
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());

    if name_len == 0 || !rest[name_len..].starts_with('>') {
        return None;
    }

    let name = &rest[..name_len];
    Some((name, pos + 1 + name_len + 1))
}

/// Find the first complete block at or after `from`
fn next_block<'a>(
    text: &'a str,
    from: usize,
    base_offset: usize,
    skipped: &mut Vec<SkippedTag>,
) -> Option<Block<'a>> {
    let mut pos = from;

    while let Some(rel) = text[pos..].find('<') {
        let at = pos + rel;

        if let Some((name, body_start)) = open_tag_at(text, at) {
            let close = format!("</{}>", name);
            match text[body_start..].find(&close) {
                Some(body_len) => {
                    let body_end = body_start + body_len;
                    return Some(Block {
                        name,
                        body: &text[body_start..body_end],
                        body_start,
                        end: body_end + close.len(),
                    });
                }
                None => skipped.push(SkippedTag {
                    name: name.to_string(),
                    offset: base_offset + at,
                }),
            }
        }

        // '<' is a single byte, so this stays on a char boundary
        pos = at + 1;
    }

    None
}

/// Scan a reply for its command and report any unterminated tags
pub fn parse_reply(reply: &str) -> Extraction {
    let mut skipped = Vec::new();

    let Some(outer) = next_block(reply, 0, 0, &mut skipped) else {
        return Extraction {
            command: None,
            skipped,
        };
    };

    let mut command = Command::new(outer.name);
    let mut pos = 0;
    while let Some(param) = next_block(outer.body, pos, outer.body_start, &mut skipped) {
        command
            .parameters
            .insert(param.name.to_string(), param.body.trim().to_string());
        pos = param.end;
    }

    Extraction {
        command: Some(command),
        skipped,
    }
}

/// Extract the first tagged command from a reply, if any
pub fn extract(reply: &str) -> Option<Command> {
    parse_reply(reply).command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply_has_no_command() {
        assert_eq!(extract("Sure, what would you like me to do?"), None);
        assert_eq!(extract("compare a < b and b > c"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_write_file_command() {
        let command =
            extract("<write_file><path>a/b.txt</path><content>hello</content></write_file>")
                .unwrap();

        assert_eq!(command.name, "write_file");
        assert_eq!(command.parameters.len(), 2);
        assert_eq!(command.parameter("path"), Some("a/b.txt"));
        assert_eq!(command.parameter("content"), Some("hello"));
    }

    #[test]
    fn test_command_surrounded_by_text_and_newlines() {
        let reply = "I'll read it now.\n\n<read_file>\n  <path>\n    src/main.rs\n  </path>\n</read_file>\n\nLet me know.";
        let command = extract(reply).unwrap();

        assert_eq!(command.name, "read_file");
        assert_eq!(command.parameter("path"), Some("src/main.rs"));
    }

    #[test]
    fn test_only_first_sibling_block_is_used() {
        let reply = "<read_file><path>one.txt</path></read_file>\n<read_file><path>two.txt</path></read_file>";
        let command = extract(reply).unwrap();

        assert_eq!(command.parameter("path"), Some("one.txt"));
    }

    #[test]
    fn test_repeated_parameter_keeps_later_value() {
        let reply = "<write_file><path>first.txt</path><path>second.txt</path><content>x</content></write_file>";
        let command = extract(reply).unwrap();

        assert_eq!(command.parameter("path"), Some("second.txt"));
        assert_eq!(command.parameters.len(), 2);
    }

    #[test]
    fn test_unterminated_tag_is_skipped_and_reported() {
        let reply = "Use <b>bold text. <read_file><path>x.txt</path></read_file>";
        let extraction = parse_reply(reply);

        let command = extraction.command.unwrap();
        assert_eq!(command.name, "read_file");
        assert_eq!(command.parameter("path"), Some("x.txt"));
        assert_eq!(
            extraction.skipped,
            vec![SkippedTag {
                name: "b".to_string(),
                offset: 4
            }]
        );
    }

    #[test]
    fn test_unterminated_outer_tag_is_passed_over() {
        let extraction = parse_reply("<write_file><path>a.txt</path>");

        // The inner block is complete, so it is the first match
        let command = extraction.command.unwrap();
        assert_eq!(command.name, "path");
        assert_eq!(extraction.skipped[0].name, "write_file");

        let extraction = parse_reply("<read_file> never closed");
        assert_eq!(extraction.command, None);
        assert_eq!(extraction.skipped.len(), 1);
    }

    #[test]
    fn test_unterminated_parameter_reported_with_reply_offset() {
        let reply = "<write_file><path>a.txt</path><content>oops</write_file>";
        let extraction = parse_reply(reply);

        let command = extraction.command.unwrap();
        assert_eq!(command.parameter("path"), Some("a.txt"));
        assert_eq!(command.parameter("content"), None);
        assert_eq!(extraction.skipped[0].name, "content");
        assert_eq!(extraction.skipped[0].offset, reply.find("<content>").unwrap());
    }

    #[test]
    fn test_only_one_level_of_nesting_is_read() {
        let reply = "<write_file><path>page.html</path><content><b>bold</b></content></write_file>";
        let command = extract(reply).unwrap();

        assert_eq!(command.parameter("content"), Some("<b>bold</b>"));
        assert_eq!(command.parameter("b"), None);
    }

    #[test]
    fn test_shortest_body_wins_for_same_name() {
        let command = extract("<a><a>x</a></a>").unwrap();

        assert_eq!(command.name, "a");
        assert!(command.parameters.is_empty());
    }

    #[test]
    fn test_tag_names_are_word_characters() {
        assert_eq!(extract("<read-file><path>x</path></read-file>").unwrap().name, "path");
        assert_eq!(extract("< read_file>x</ read_file>"), None);
        assert_eq!(extract("<>x</>"), None);
    }

    #[test]
    fn test_empty_command_body() {
        let command = extract("<status></status>").unwrap();

        assert_eq!(command.name, "status");
        assert!(command.parameters.is_empty());
    }

    #[test]
    fn test_non_ascii_text_around_tags() {
        let command = extract("Voilà → <read_file><path>café/menu.txt</path></read_file> ✓").unwrap();

        assert_eq!(command.parameter("path"), Some("café/menu.txt"));
    }
}
