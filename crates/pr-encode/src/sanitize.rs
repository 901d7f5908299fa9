//! Sanitizers for strings embedded in JSON fragments.
//!
//! The wire keeps structurally unsafe characters out of specific fields
//! rather than escaping everything: paths and arguments normalize
//! backslashes to forward slashes, arguments additionally flatten
//! whitespace and escape quotes, and log lines are reduced to printable
//! ASCII. The normalization is lossy on purpose; consumers of these streams
//! expect display-simplified values.

/// Normalize path separators: every backslash becomes a forward slash.
pub fn sanitize_path(name: &str) -> String {
    name.replace('\\', "/")
}

/// Normalize an argv/envp string: backslashes become slashes, newlines and
/// tabs become spaces, embedded quotes are escaped.
pub fn sanitize_arg(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push('/'),
            '\n' | '\t' => out.push(' '),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out
}

/// Reduce a log line to printable ASCII: quotes become spaces, control and
/// high bytes become underscores.
pub fn sanitize_log(line: &str) -> String {
    line.bytes()
        .map(|b| match b {
            b'"' => ' ',
            b if b < 32 || b > 125 => '_',
            b => b as char,
        })
        .collect()
}
