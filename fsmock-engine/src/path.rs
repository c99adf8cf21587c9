// ── Constants ───────────────────────────────────────────────────────────────

pub const ROOT: &str = "/";
pub const SEPARATOR: char = '/';

// ── Path functions ──────────────────────────────────────────────────────────

/// Normalize a path: replace backslashes, resolve `.` and `..`, collapse
/// repeated separators and drop trailing ones. The result is always absolute.
pub fn normalize_path(input: &str) -> String {
    let p = input.replace('\\', "/");

    let mut resolved: Vec<&str> = Vec::new();
    for seg in p.split(SEPARATOR) {
        if seg.is_empty() || seg == "." {
            continue;
        }
        if seg == ".." {
            resolved.pop();
        } else {
            resolved.push(seg);
        }
    }

    if resolved.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", resolved.join("/"))
    }
}

/// Join `name` onto `base` and normalize the result.
pub fn join(base: &str, name: &str) -> String {
    normalize_path(&format!("{}/{}", base, name))
}

/// Return the final segment of a normalized path. Empty for the root.
pub fn base_name(normalized_path: &str) -> &str {
    if normalized_path == ROOT {
        return "";
    }
    match normalized_path.rfind(SEPARATOR) {
        Some(pos) => &normalized_path[pos + 1..],
        None => normalized_path,
    }
}

/// True if `path` is `root` itself or lies underneath it.
/// Matching is per component: `/home/jo` does not contain `/home/john`.
pub fn is_within(path: &str, root: &str) -> bool {
    if root == ROOT {
        return path.starts_with(SEPARATOR);
    }
    match path.strip_prefix(root) {
        Some("") => true,
        Some(rest) => rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// If `path` is an immediate child of `dir`, return the child's name.
pub fn child_name<'a>(path: &'a str, dir: &str) -> Option<&'a str> {
    let rest = if dir == ROOT {
        path.strip_prefix(SEPARATOR)?
    } else {
        path.strip_prefix(dir)?.strip_prefix(SEPARATOR)?
    };
    if rest.is_empty() || rest.contains(SEPARATOR) {
        return None;
    }
    Some(rest)
}

// ── Tests ───────────────────────────────────────────────────────────────────
