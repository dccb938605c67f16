//! `.env` file support: KEY=VALUE lines, `#` comments, optional quotes.

/// Parse `.env` contents into key/value pairs, in file order.
pub fn parse(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Pairs from `contents` whose keys `is_set` reports as unset. Variables
/// already present in the environment win.
pub fn unset_assignments(
    contents: &str,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    parse(contents)
        .into_iter()
        .filter(|(key, _)| !is_set(key))
        .collect()
}

/// Load `./.env` into the process environment, if the file exists.
pub fn load() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for (key, value) in unset_assignments(&contents, |key| std::env::var_os(key).is_some()) {
        std::env::set_var(key, value);
    }
}
