use std::sync::LazyLock;

use regex::Regex;

use crate::server::model::server_status::Version;

static KNOWN_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z]\s\d\.\d\d\.\d)|(\d\.\d\d\.\d)").expect("version pattern is valid")
});

/// Replaces unrecognised version strings with `Unknown` / `-1`.
///
/// Servers that are still starting or sit behind a maintenance plugin report arbitrary
/// text as their version.
pub fn normalize_version(version: Version) -> Version {
    if KNOWN_VERSION.is_match(&version.name) {
        version
    } else {
        Version {
            name: "Unknown".to_string(),
            protocol: -1,
        }
    }
}

/// Short display form of a version string: `"Paper 1.20.4"` becomes `"1.20.4"`.
pub fn short_version(name: &str) -> &str {
    name.split(' ')
        .nth(1)
        .filter(|part| !part.is_empty())
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(name: &str, protocol: i32) -> Version {
        Version {
            name: name.to_string(),
            protocol,
        }
    }

    #[test]
    fn keeps_recognised_versions() {
        assert_eq!(
            normalize_version(version("Paper 1.20.4", 765)),
            version("Paper 1.20.4", 765)
        );
        assert_eq!(
            normalize_version(version("1.12.2", 340)),
            version("1.12.2", 340)
        );
    }

    #[test]
    fn replaces_unrecognised_versions() {
        assert_eq!(
            normalize_version(version("§4Maintenance", 1)),
            version("Unknown", -1)
        );
        assert_eq!(normalize_version(version("1.8", 47)), version("Unknown", -1));
    }

    #[test]
    fn short_version_takes_second_word() {
        assert_eq!(short_version("Paper 1.20.4"), "1.20.4");
        assert_eq!(short_version("1.20.4"), "1.20.4");
        assert_eq!(short_version("Unknown"), "Unknown");
    }
}
