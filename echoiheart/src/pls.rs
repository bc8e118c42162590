//! PLS playlist parsing
//!
//! Stations sometimes publish a PLS pointer file instead of a stream URL.
//! Only the first entry matters: the value of the line starting with `File1=`.

const FIRST_ENTRY_KEY: &str = "File1=";

/// Return the first stream URL of a PLS playlist
///
/// The value is returned exactly as written, without trimming or decoding.
/// Keys are case-sensitive, and only `File1` is consulted.
pub fn parse_pls(content: &str) -> Option<&str> {
    content
        .lines()
        .find_map(|line| line.strip_prefix(FIRST_ENTRY_KEY))
}
