//! Slash/backslash path helpers for vault-relative paths.

pub const DEFAULT_NAME: &str = "Untitled";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedPath {
    pub dir: String,
    pub name: String,
}

fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

/// Split `path` into its directory (separators kept as written, trailing one
/// included) and its base name. An empty base name becomes [`DEFAULT_NAME`].
pub fn parse(path: &str) -> ParsedPath {
    let split = path.rfind(is_separator).map(|idx| idx + 1).unwrap_or(0);
    let (dir, name) = path.split_at(split);

    ParsedPath {
        dir: dir.to_string(),
        name: if name.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            name.to_string()
        },
    }
}

/// Join segments with `/` and normalize the result.
///
/// Segments are trimmed and empty ones dropped. Pass `.flatten()` over
/// optional segments to skip absent entries.
pub fn join<I>(segments: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let joined = segments
        .into_iter()
        .filter_map(|segment| {
            let trimmed = segment.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect::<Vec<_>>()
        .join("/");

    normalize(&joined)
}

/// Convert separators to `/`, collapse runs of them and drop a trailing one.
/// A bare root stays `/`.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for ch in path.chars() {
        if is_separator(ch) {
            if !out.ends_with('/') {
                out.push('/');
            }
        } else {
            out.push(ch);
        }
    }

    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(dir: &str, name: &str) -> ParsedPath {
        ParsedPath {
            dir: dir.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn parse_matches_expected_cases() {
        let cases = [
            ("", parsed("", "Untitled")),
            ("/one/two/", parsed("/one/two/", "Untitled")),
            ("/one/two/file name", parsed("/one/two/", "file name")),
            ("file", parsed("", "file")),
            ("/", parsed("/", "Untitled")),
            ("a\\b\\c", parsed("a\\b\\", "c")),
            ("a/b\\", parsed("a/b\\", "Untitled")),
        ];

        for (input, expected) in cases {
            assert_eq!(parse(input), expected, "input={input:?}");
        }
    }

    #[test]
    fn join_normalizes_separators() {
        assert_eq!(join(["a/", "/b", "c"]), "a/b/c");
        assert_eq!(join(["a\\b", "c\\"]), "a/b/c");
        assert_eq!(join([" notes ", "sheet.csv"]), "notes/sheet.csv");
        assert_eq!(join(["/", "data"]), "/data");
        assert_eq!(join(["/"]), "/");
        assert_eq!(join(["", "x.csv"]), "x.csv");
        assert_eq!(join(Vec::<String>::new()), "");
    }

    #[test]
    fn join_skips_absent_segments() {
        let segments = [Some("a"), None, Some("b")];
        assert_eq!(join(segments.into_iter().flatten()), "a/b");
    }

    #[test]
    fn normalize_collapses_mixed_runs() {
        assert_eq!(normalize("a//\\//b///"), "a/b");
        assert_eq!(normalize("\\\\"), "/");
    }
}
