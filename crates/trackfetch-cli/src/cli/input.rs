//! Reading the link argument, including the "-" paste-from-stdin form.

use std::io::BufRead;
use std::time::Duration;

use trackfetch_core::Session;

/// Link argument meaning "read it from stdin".
pub(crate) const STDIN_ARG: &str = "-";

pub(crate) const PASTE_FAILED_NOTICE: &str =
    "Could not read the pasted link; pass it as an argument instead.";

const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Returns the link text. For `-`, reads one line from `stdin`; if that fails
/// or is blank a notice is posted on `session` and `None` is returned. The
/// session's operation state is left untouched either way.
pub(crate) fn link_text<R: BufRead>(arg: &str, mut stdin: R, session: &mut Session) -> Option<String> {
    if arg != STDIN_ARG {
        return Some(arg.to_string());
    }
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(_) if !line.trim().is_empty() => Some(line.trim().to_string()),
        Ok(_) => {
            tracing::warn!("paste: stdin was empty");
            session.post_notice(PASTE_FAILED_NOTICE, NOTICE_TTL);
            None
        }
        Err(e) => {
            tracing::warn!("paste: could not read stdin: {}", e);
            session.post_notice(PASTE_FAILED_NOTICE, NOTICE_TTL);
            None
        }
    }
}
