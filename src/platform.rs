//! CPU model discovery for report labeling
//!
//! Cosmetic only: the analysis never branches on the platform string.

use std::fs;

/// First "model name" entry of /proc/cpuinfo, or "Unknown" when the file
/// is missing or has no such entry
pub fn platform_label() -> String {
    fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|cpuinfo| parse_model_name(&cpuinfo))
        .unwrap_or_else(|| "Unknown".to_string())
}

fn parse_model_name(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, model)| model.trim().to_string())
        .filter(|model| !model.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_name() {
        let cpuinfo = "\
processor\t: 0
vendor_id\t: GenuineIntel
model name\t: Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz
cpu MHz\t\t: 3600.000
";
        assert_eq!(
            parse_model_name(cpuinfo),
            Some("Intel(R) Core(TM) i7-9700K CPU @ 3.60GHz".to_string())
        );
    }

    #[test]
    fn test_parse_model_name_takes_first_entry() {
        let cpuinfo = "model name\t: CPU A\nmodel name\t: CPU B\n";
        assert_eq!(parse_model_name(cpuinfo), Some("CPU A".to_string()));
    }

    #[test]
    fn test_parse_model_name_missing() {
        assert_eq!(parse_model_name("processor\t: 0\n"), None);
        assert_eq!(parse_model_name(""), None);
    }

    #[test]
    fn test_parse_model_name_empty_value() {
        assert_eq!(parse_model_name("model name\t:  \n"), None);
    }

    #[test]
    fn test_platform_label_never_empty() {
        assert!(!platform_label().is_empty());
    }
}
