//! Tab-separated report lines.
//!
//! Floats use the shortest round-tripping form that always shows a decimal
//! point or an exponent: `10.0`, `0.3`, `1e-05`, `1.5e+16`.

use voicestats_core::{FileStats, TotalSummary};

/// Shortest round-trip rendering of `value`, never a bare integer.
pub fn float_repr(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".into()
        } else if value > 0.0 {
            "inf".into()
        } else {
            "-inf".into()
        };
    }

    let magnitude = value.abs();
    if value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let sci = format!("{value:e}");
        let Some((mantissa, exponent)) = sci.split_once('e') else {
            return sci;
        };
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(d) => ('-', d),
            None => ('+', exponent),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }

    format!("{value:?}")
}

pub fn file_line(stats: &FileStats) -> String {
    format!(
        "duration:\t{}\tvoiced:\t{}\tprop:{}\tfile\t{}",
        float_repr(stats.duration),
        float_repr(stats.voiced),
        float_repr(stats.proportion),
        stats.file.display()
    )
}

pub fn total_line(total: &TotalSummary) -> String {
    format!(
        "total duration:\t{}\ttotal voiced:\t{}\ttotal prop:{}",
        float_repr(total.total_duration),
        float_repr(total.total_voiced),
        float_repr(total.total_proportion)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicestats_core::Segment;

    #[test]
    fn float_repr_keeps_decimal_point() {
        assert_eq!(float_repr(10.0), "10.0");
        assert_eq!(float_repr(0.0), "0.0");
        assert_eq!(float_repr(0.3), "0.3");
        assert_eq!(float_repr(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(float_repr(4.2), "4.2");
    }

    #[test]
    fn float_repr_switches_to_exponent() {
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(0.00001), "1e-05");
        assert_eq!(float_repr(1.5e16), "1.5e+16");
        assert_eq!(float_repr(-2.5e-7), "-2.5e-07");
        assert_eq!(float_repr(1e100), "1e+100");
    }

    #[test]
    fn file_line_layout() {
        let stats = FileStats::new(
            "clip.wav",
            10.0,
            vec![Segment {
                start: 1.0,
                end: 4.0,
                frames: 100,
            }],
        )
        .unwrap();
        assert_eq!(
            file_line(&stats),
            "duration:\t10.0\tvoiced:\t3.0\tprop:0.3\tfile\tclip.wav"
        );
    }

    #[test]
    fn total_line_layout() {
        let total = TotalSummary {
            total_duration: 14.0,
            total_voiced: 4.0,
            total_proportion: 4.0 / 14.0,
        };
        assert_eq!(
            total_line(&total),
            "total duration:\t14.0\ttotal voiced:\t4.0\ttotal prop:0.2857142857142857"
        );
    }
}
