//! SMTP reply parsing.

use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// Parses an SMTP reply from its raw lines.
///
/// Replies are single-line (`250 OK`) or multi-line, where continuation
/// lines use `-` after the code and the final line uses a space:
/// `250-First`, `250-Second`, `250 Last`.
///
/// # Errors
///
/// Returns an error if any line is too short or the code is not numeric.
pub fn parse_reply(lines: &[String]) -> Result<Reply> {
    let Some(first) = lines.first() else {
        return Err(Error::Protocol("empty reply".into()));
    };

    if first.len() < 3 {
        return Err(Error::Protocol(format!("reply line too short: {first:?}")));
    }

    let code = first[..3]
        .parse::<u16>()
        .map_err(|_| Error::Protocol(format!("invalid reply code in {first:?}")))?;

    let mut message = Vec::with_capacity(lines.len());
    for line in lines {
        match line.len() {
            3 => message.push(String::new()),
            len if len >= 4 => message.push(line[4..].to_string()),
            _ => return Err(Error::Protocol(format!("malformed reply line: {line:?}"))),
        }
    }

    Ok(Reply::new(ReplyCode::new(code), message))
}

/// Returns true if a line terminates a reply (space separator after the code).
#[must_use]
pub fn is_final_line(line: &str) -> bool {
    line.len() == 3 || (line.len() >= 4 && line.as_bytes()[3] == b' ')
}
