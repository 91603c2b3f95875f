/// Resolves a client supplied path against the current directory.
///
/// A payload starting with `/` restarts from the root. `..` drops one segment
/// (never above `/`), `.` and empty segments are skipped. The result is always
/// absolute and normalized. No filesystem access happens here.
pub fn resolve(cwd: &str, payload: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    let base = if payload.starts_with('/') { "" } else { cwd };
    for token in base.split('/').chain(payload.split('/')) {
        match token {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            name => segments.push(name),
        }
    }

    if segments.is_empty() {
        String::from("/")
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Splits an absolute path into its parent directory and last segment.
pub fn split_path(path: &str) -> (String, String) {
    match path.rsplit_once('/') {
        Some((head, tail)) => {
            let head = if head.is_empty() { "/" } else { head };
            (head.to_string(), tail.to_string())
        }
        None => (String::from("/"), path.to_string()),
    }
}
