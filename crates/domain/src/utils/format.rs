//! Byte size formatting for reports.

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Format a byte count using binary units with two decimals.
///
/// Values below one kibibyte are printed as plain bytes.
///
/// ```rust
/// use dbsweep_domain::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1536), "1.50 KB");
/// assert_eq!(format_bytes(3 * 1_048_576), "3.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let value = bytes as f64;
    if bytes >= GIB {
        format!("{:.2} GB", value / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MB", value / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KB", value / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_unit_boundary() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(MIB), "1.00 MB");
        assert_eq!(format_bytes(GIB), "1.00 GB");
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(format_bytes(1_500_000), "1.43 MB");
        assert_eq!(format_bytes(5 * GIB + GIB / 4), "5.25 GB");
    }
}
