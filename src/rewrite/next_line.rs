use super::{line_ending, to_crlf};

/// Placeholder in a replacement template that receives the version
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Fills every `{version}` in `template`
pub fn render(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

/// Replaces the line following every line that starts with `search`.
///
/// The matching line is kept as is and the next line is swapped for
/// `replacement`, written verbatim (it carries its own line ending) except
/// that its line breaks follow the replaced line's: in a CRLF file they are
/// written as `\r\n`. The replaced line is never tested against `search`
/// itself, so the search re-arms only on the line after it. A match on the
/// last line has nothing to replace and appends nothing.
pub fn rewrite(content: &str, search: &str, replacement: &str) -> String {
    let crlf_replacement = to_crlf(replacement);
    let mut out = String::with_capacity(content.len() + replacement.len());
    let mut replace_next = false;

    for line in content.split_inclusive('\n') {
        if replace_next {
            if line_ending(line) == "\r\n" {
                out.push_str(&crlf_replacement);
            } else {
                out.push_str(replacement);
            }
            replace_next = false;
        } else {
            replace_next = line.starts_with(search);
            out.push_str(line);
        }
    }

    out
}
