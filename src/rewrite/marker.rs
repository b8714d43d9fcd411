use super::line_ending;

/// Line prefix identifying the version assignment in a Python source file
pub const VERSION_MARKER: &str = "__version__ =";

/// Builds the assignment that replaces a marker line, without its terminator
pub fn marker_line(version: &str) -> String {
    format!("__version__ = \"{}\"", version)
}

/// Rewrites every line that starts with [`VERSION_MARKER`].
///
/// Matching lines are replaced wholesale by [`marker_line`] and keep their own
/// line ending (`\n` when the last line had none); every other line is copied
/// byte for byte. If the marker never occurs the output equals the input.
pub fn rewrite(content: &str, version: &str) -> String {
    let replacement = marker_line(version);
    let mut out = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        if line.starts_with(VERSION_MARKER) {
            out.push_str(&replacement);
            out.push_str(line_ending(line));
        } else {
            out.push_str(line);
        }
    }

    out
}
