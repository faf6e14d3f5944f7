//! Output file naming.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

/// Base name of reports written without an explicit output path.
pub const DEFAULT_REPORT_BASENAME: &str = "Relatorio_Rastreabilidade";

/// `<base>_<YYYYMMDD_HHMMSS><ext>` using the local clock.
pub fn unique_output_name(base: &str, extension: &str) -> String {
    output_name_at(base, extension, Local::now().naive_local())
}

/// `<base>_<YYYYMMDD_HHMMSS><ext>` for a fixed timestamp.
pub fn output_name_at(base: &str, extension: &str, timestamp: NaiveDateTime) -> String {
    let extension = extension.trim_start_matches('.');
    format!(
        "{base}_{stamp}.{extension}",
        stamp = timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// Timestamped path in `dir` that does not exist yet.
///
/// Two reports written in the same second get `_1`, `_2`, ... suffixes.
pub fn unique_output_path(dir: &Path, base: &str, extension: &str) -> PathBuf {
    let name = unique_output_name(base, extension);
    let candidate = dir.join(&name);
    if !candidate.exists() {
        return candidate;
    }
    let stem = name
        .rsplit_once('.')
        .map_or(name.as_str(), |(stem, _)| stem);
    let extension = extension.trim_start_matches('.');
    (1u32..)
        .map(|n| dir.join(format!("{stem}_{n}.{extension}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn name_has_timestamp_and_extension() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 1)
            .unwrap();
        assert_eq!(
            output_name_at(DEFAULT_REPORT_BASENAME, ".xlsx", timestamp),
            "Relatorio_Rastreabilidade_20240307_090501.xlsx"
        );
        assert_eq!(output_name_at("r", "csv", timestamp), "r_20240307_090501.csv");
    }

    #[test]
    fn unique_name_shape() {
        let name = unique_output_name("Relatorio", ".xlsx");
        assert!(name.starts_with("Relatorio_"));
        assert!(name.ends_with(".xlsx"));
        assert_eq!(name.len(), "Relatorio_".len() + 15 + ".xlsx".len());
    }
}
