/// Canonicalize a path segment: one leading slash, no trailing slash.
///
/// Only a single trailing slash is stripped, and `/` stays `/`.
pub fn normalize_path(path: &str) -> String {
    let trimmed = match path.strip_suffix('/') {
        Some(rest) if path.len() > 1 => rest,
        _ => path,
    };

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Join a prefix and a path the way a filesystem path join would.
///
/// Repeated slashes collapse, `.` segments drop and `..` pops the previous
/// segment. The result never climbs above the root.
pub fn join_paths(prefix: &str, path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in prefix.split('/').chain(path.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}
