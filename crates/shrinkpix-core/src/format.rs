//! Human-readable sizes and savings figures for the results list.

const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
const STEP: u64 = 1024;

/// Format a byte count using the largest of Bytes, KB or MB that keeps the
/// value at or above 1.
///
/// The value is rounded to two decimals and trailing zeros are dropped, so
/// 1536 formats as `"1.5 KB"`. There is no unit above MB: larger inputs
/// stay in MB.
pub fn format_byte_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    while index + 1 < UNITS.len() && bytes >= STEP.pow(index as u32 + 1) {
        index += 1;
    }

    let value = bytes as f64 / STEP.pow(index as u32) as f64;
    format!("{} {}", trim_two_decimals(value), UNITS[index])
}

/// Round to two decimals (halves up) and drop trailing zeros.
fn trim_two_decimals(value: f64) -> String {
    let hundredths = (value * 100.0 + 0.5).floor() as u64;
    let whole = hundredths / 100;
    let frac = hundredths % 100;

    if frac == 0 {
        whole.to_string()
    } else if frac % 10 == 0 {
        format!("{}.{}", whole, frac / 10)
    } else {
        format!("{}.{:02}", whole, frac)
    }
}

/// Percentage of the original size saved by compression.
///
/// Computed as `round((1 - compressed / original) * 100)` with halves
/// rounded up. Negative when the output grew. An empty original yields 0.
pub fn savings_percent(original_size: u64, compressed_size: u64) -> i64 {
    if original_size == 0 {
        return 0;
    }
    let ratio = compressed_size as f64 / original_size as f64;
    ((1.0 - ratio) * 100.0 + 0.5).floor() as i64
}


// ============================================================================
// Property-Based Tests
// ============================================================================
