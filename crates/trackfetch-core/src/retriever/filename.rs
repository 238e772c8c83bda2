//! Output file naming.

use crate::save::TEMP_SUFFIX;

/// Extension appended to every saved payload.
pub const AUDIO_EXTENSION: &str = "mp3";

/// Used when the desired name is blank.
const FALLBACK_STEM: &str = "track";

/// Characters that are unsafe in file names on at least one common filesystem.
const UNSAFE_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Longest file name (in bytes) common filesystems accept.
const NAME_MAX_BYTES: usize = 255;

/// Room for the widest numbered suffix the file sink picks, `" (1000)"`.
const NUMBERED_SUFFIX_BYTES: usize = 7;

/// Longest stem that still fits once the numbered suffix, extension and
/// temp suffix are added.
const MAX_STEM_BYTES: usize =
    NAME_MAX_BYTES - NUMBERED_SUFFIX_BYTES - 1 - AUDIO_EXTENSION.len() - TEMP_SUFFIX.len();

/// Replaces each of `\ / : * ? " < > |` and every control character (NUL
/// included) with `_`, then cuts the result to `MAX_STEM_BYTES` at a char
/// boundary.
///
/// Idempotent: the output holds none of those characters and is already
/// short enough, so a second pass changes nothing. Blank names become `track`.
pub fn sanitize_file_name(name: &str) -> String {
    if name.trim().is_empty() {
        return FALLBACK_STEM.to_string();
    }
    let mut out: String = name
        .chars()
        .map(|c| {
            if UNSAFE_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    if out.len() > MAX_STEM_BYTES {
        let mut end = MAX_STEM_BYTES;
        while !out.is_char_boundary(end) {
            end -= 1;
        }
        out.truncate(end);
        if out.trim().is_empty() {
            return FALLBACK_STEM.to_string();
        }
    }
    out
}

/// `<sanitized name>.mp3`
pub fn output_file_name(desired: &str) -> String {
    format!("{}.{}", sanitize_file_name(desired), AUDIO_EXTENSION)
}
