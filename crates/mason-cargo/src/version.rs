//! Translation of Cargo version requirements into Meson version
//! constraints.
//!
//! Cargo has a few syntaxes:
//! - `^` (caret): at least this version, but not the next major version
//! - `~` (tilde): at least this version, but not the next minor version
//! - `*` (wildcard): globbing; a bare `*` means unconstrained
//! - plain comparisons like Meson's `<`, `>`, `>=` (Cargo writes `=`
//!   where Meson writes `==`)
//!
//! A requirement may be a comma-separated list; each part translates
//! independently and the constraints concatenate.

use crate::error::{ConvertError, Result};

/// Translate one Cargo requirement string into Meson constraint strings.
pub fn version_to_meson(req: &str) -> Result<Vec<String>> {
    let mut constraints = Vec::new();

    for part in req.split(',') {
        let part = part.trim();
        if let Some(rest) = part.strip_prefix('^') {
            caret(rest, &mut constraints)?;
        } else if let Some(rest) = part.strip_prefix('~') {
            tilde(rest, &mut constraints)?;
        } else if part.ends_with('*') {
            wildcard(part, &mut constraints)?;
        } else if part.starts_with(['<', '>']) {
            constraints.push(part.to_string());
        } else if part.starts_with('=') {
            // Cargo writes `= 1.2`, Meson writes `== 1.2`.
            constraints.push(format!("={part}"));
        } else {
            return Err(ConvertError::VersionReq(req.to_string()));
        }
    }

    Ok(constraints)
}

/// Split `major[.minor[.patch]]` into its numeric parts.
fn split(raw: &str) -> Result<(u64, Option<u64>, Option<u64>)> {
    let mut parts = raw.split('.');
    let parse = |s: Option<&str>| -> Result<Option<u64>> {
        match s {
            None => Ok(None),
            Some(v) => v
                .parse()
                .map(Some)
                .map_err(|_| ConvertError::VersionReq(raw.to_string())),
        }
    };

    let major = parse(parts.next())?.ok_or_else(|| ConvertError::VersionReq(raw.to_string()))?;
    let minor = parse(parts.next())?;
    let patch = parse(parts.next())?;
    if parts.next().is_some() {
        return Err(ConvertError::VersionReq(raw.to_string()));
    }
    Ok((major, minor, patch))
}

fn caret(raw: &str, out: &mut Vec<String>) -> Result<()> {
    let (major, minor, patch) = split(raw)?;
    out.push(format!(
        ">= {}.{}.{}",
        major,
        minor.unwrap_or(0),
        patch.unwrap_or(0)
    ));

    // The upper bound excludes the leftmost non-zero component's successor.
    if major != 0 {
        out.push(format!("< {}.0.0", major + 1));
    } else if minor.unwrap_or(0) != 0 {
        out.push(format!("< 0.{}.0", minor.unwrap_or(0) + 1));
    } else if patch.unwrap_or(0) != 0 {
        out.push(format!("< 0.0.{}", patch.unwrap_or(0) + 1));
    } else if minor.is_some() {
        // ^0.0 and ^0 are odd cases: the last given component still caps.
        out.push("< 0.1.0".to_string());
    } else {
        out.push("< 1.0.0".to_string());
    }
    Ok(())
}

fn tilde(raw: &str, out: &mut Vec<String>) -> Result<()> {
    let (major, minor, patch) = split(raw)?;
    out.push(format!(
        ">= {}.{}.{}",
        major,
        minor.unwrap_or(0),
        patch.unwrap_or(0)
    ));

    if patch.is_some() || minor.is_some() {
        out.push(format!("< {}.{}.0", major, minor.unwrap_or(0) + 1));
    } else {
        out.push(format!("< {}.0.0", major + 1));
    }
    Ok(())
}

fn wildcard(raw: &str, out: &mut Vec<String>) -> Result<()> {
    // crates.io doesn't allow a bare `*`, but be a bit permissive.
    if raw == "*" {
        return Ok(());
    }

    let (major, minor, patch) = split(raw.trim_end_matches(['.', '*']))?;
    if patch.is_some() {
        // `1.2.3.*` has no meaning.
        return Err(ConvertError::VersionReq(raw.to_string()));
    }

    out.push(format!(">= {}.{}.0", major, minor.unwrap_or(0)));
    if let Some(minor) = minor {
        out.push(format!("< {}.{}.0", major, minor + 1));
    } else {
        out.push(format!("< {}.0.0", major + 1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(req: &str, expected: &[&str]) {
        assert_eq!(version_to_meson(req).unwrap(), expected, "req: {req}");
    }

    #[test]
    fn test_caret() {
        check("^1", &[">= 1.0.0", "< 2.0.0"]);
        check("^2.3", &[">= 2.3.0", "< 3.0.0"]);
        check("^0.3.1", &[">= 0.3.1", "< 0.4.0"]);
        check("^0.0.1", &[">= 0.0.1", "< 0.0.2"]);
        check("^0.0", &[">= 0.0.0", "< 0.1.0"]);
        check("^0", &[">= 0.0.0", "< 1.0.0"]);
    }

    #[test]
    fn test_tilde() {
        check("~1.2.3", &[">= 1.2.3", "< 1.3.0"]);
        check("~1.2", &[">= 1.2.0", "< 1.3.0"]);
        check("~1", &[">= 1.0.0", "< 2.0.0"]);
    }

    #[test]
    fn test_wildcard() {
        check("*", &[]);
        check("1.*", &[">= 1.0.0", "< 2.0.0"]);
        check("1.2.*", &[">= 1.2.0", "< 1.3.0"]);
    }

    #[test]
    fn test_comparisons() {
        check(">= 1.0.0", &[">= 1.0.0"]);
        check(">= 1", &[">= 1"]);
        check("= 1", &["== 1"]);
        check("< 2.3", &["< 2.3"]);
    }

    #[test]
    fn test_multiple() {
        check(">= 1.0.0, < 1.5", &[">= 1.0.0", "< 1.5"]);
        check("^1, < 1.5", &[">= 1.0.0", "< 2.0.0", "< 1.5"]);
    }

    #[test]
    fn test_invalid() {
        assert!(version_to_meson("about 1.0").is_err());
        assert!(version_to_meson("^one").is_err());
        assert!(version_to_meson("1.2.3.4.*").is_err());
    }
}
