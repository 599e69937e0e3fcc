pub mod config;
pub mod load;
pub mod mem;
pub mod metrics;

/// Pulls the first integer after a `Key:` line prefix out of procfs-style
/// text, e.g. `extract_num(status, "VmRSS:")` on `"VmRSS:\t  7890 kB"`.
pub fn extract_num(haystack: &str, prefix: &str) -> Option<usize> {
    haystack
        .lines()
        .find_map(|line| line.strip_prefix(prefix))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|num| num.parse().ok())
}
