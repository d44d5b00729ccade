//! Single-dash long flag spellings.
//!
//! Release scripts invoke the tool as `-owner acme -prevRef v1.0`, so those
//! spellings are rewritten to the kebab-case double-dash flags the
//! ortho-config parser understands before configuration is loaded.

use std::ffi::{OsStr, OsString};

/// Accepted long flag names and the parser flag each one maps to.
const FLAG_SPELLINGS: &[(&str, &str)] = &[
    ("owner", "--owner"),
    ("repo", "--repo"),
    ("branch", "--branch"),
    ("prevRef", "--prev-ref"),
    ("currRef", "--curr-ref"),
];

/// Rewrites `-owner`, `-prevRef=v1.0`, `--currRef` and the other long flag
/// spellings into the flags the configuration parser accepts.
///
/// The program name, short flags, values, and everything after `--` pass
/// through unchanged.
///
/// # Example
///
/// ```
/// use std::ffi::OsString;
///
/// use release_tickets::config::normalise_flag_spellings;
///
/// let args = ["release-tickets", "-prevRef", "v1.0", "-o", "acme"].map(OsString::from);
/// let normalised = normalise_flag_spellings(args);
///
/// assert_eq!(
///     normalised,
///     ["release-tickets", "--prev-ref", "v1.0", "-o", "acme"].map(OsString::from)
/// );
/// ```
#[must_use]
pub fn normalise_flag_spellings<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalised = Vec::new();
    let mut options_ended = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || options_ended {
            normalised.push(arg);
            continue;
        }
        if arg == "--" {
            options_ended = true;
            normalised.push(arg);
            continue;
        }
        normalised.push(rewrite_flag(&arg).unwrap_or(arg));
    }

    normalised
}

fn rewrite_flag(arg: &OsStr) -> Option<OsString> {
    let text = arg.to_str()?;
    let flag = text
        .strip_prefix("--")
        .or_else(|| text.strip_prefix('-'))?;
    let (name, attached) = flag
        .split_once('=')
        .map_or((flag, None), |(key, value)| (key, Some(value)));
    let (_, long) = FLAG_SPELLINGS
        .iter()
        .find(|(spelling, _)| *spelling == name)?;

    Some(attached.map_or_else(
        || OsString::from(*long),
        |value| OsString::from(format!("{long}={value}")),
    ))
}
