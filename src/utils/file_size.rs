pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Human readable size with 1024 as divisor. Stops at MB.
    ///
    /// Two decimals, ties rounded up (`1152` is `1.13 KB`).
    pub fn format_size(size: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = 1024 * 1024;

        if size < KB {
            format!("{} B", size)
        } else if size < MB {
            format!("{:.2} KB", round_half_up(size as f64 / KB as f64))
        } else {
            format!("{:.2} MB", round_half_up(size as f64 / MB as f64))
        }
    }
}

fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
