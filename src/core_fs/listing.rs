use crate::constants::MONTH_NAMES;
use crate::core_fs::{matches, resolve, split_path, FileStat, Storage};
use chrono::{DateTime, Datelike, Local, Timelike};
use log::{debug, warn};

/// Builds the listing lines for a directory, a single file or a glob.
///
/// The argument is first enumerated as a directory. When that fails it is
/// split into parent and last segment, and the parent's entries are filtered
/// through the glob matcher. A parent that cannot be read either yields an
/// empty listing. Entries are sorted case-insensitively. Lines are CRLF
/// terminated, either bare names or `ls -l` style records.
pub async fn list(storage: &Storage, path: &str, include_details: bool) -> Vec<String> {
    let (directory, names) = match storage.list_dir(path).await {
        Ok(names) => (path.to_string(), names),
        Err(err) => {
            debug!("{} is not a directory ({}), treating it as a pattern", path, err);
            let (parent, pattern) = split_path(path);
            let names = match storage.list_dir(&parent).await {
                Ok(names) => names.into_iter().filter(|name| matches(name, &pattern)).collect(),
                Err(e) => {
                    debug!("Nothing to list for {}: {}", path, e);
                    Vec::new()
                }
            };
            (parent, names)
        }
    };

    let mut names: Vec<String> = names;
    names.sort_by_key(|name| name.to_lowercase());

    if !include_details {
        return names.into_iter().map(|name| format!("{}\r\n", name)).collect();
    }

    let now = Local::now();
    let mut lines = Vec::with_capacity(names.len());
    for name in names {
        match storage.stat(&resolve(&directory, &name)).await {
            Ok(stat) => lines.push(format_entry(&name, &stat, now)),
            Err(e) => warn!("Skipping {} in listing of {}: {}", name, directory, e),
        }
    }
    lines
}

/// Formats one detailed listing record.
///
/// The last date column shows `HH:MM` for entries modified in the current
/// year and the year otherwise, as generic FTP clients expect.
pub fn format_entry(name: &str, stat: &FileStat, now: DateTime<Local>) -> String {
    let permissions = if stat.is_dir { "drwxr-xr-x" } else { "-rw-r--r--" };
    let modified: DateTime<Local> = stat.modified.into();
    let month = MONTH_NAMES[modified.month0() as usize];

    let time_or_year = if modified.year() == now.year() {
        format!("{:02}:{:02}", modified.hour(), modified.minute())
    } else {
        format!("{:>5}", modified.year())
    };

    format!(
        "{}    1 owner group {:>10} {} {:>2} {} {}\r\n",
        permissions,
        stat.size,
        month,
        modified.day(),
        time_or_year,
        name
    )
}
