//! Wire types for the PDDIKTI endpoints
//!
//! Field names follow the JSON the API actually emits (including the
//! registry's own `sinkatan_pt` spelling); Rust-side names are the
//! translated ones the rest of the crate uses. Display translations for
//! the sex code and the enrollment date live here as well so both the TUI
//! and the plain CLI render them identically.

use chrono::{DateTime, Locale, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of the search endpoint's response array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    /// Registry identifier used by the detail endpoint
    #[serde(default)]
    pub id: String,
    /// Student name
    #[serde(rename = "nama", default)]
    pub name: String,
    /// Student identification number
    #[serde(default)]
    pub nim: String,
    /// Institution name
    #[serde(rename = "nama_pt", default)]
    pub institution_name: String,
    /// Institution abbreviation
    #[serde(rename = "sinkatan_pt", default)]
    pub institution_abbr: String,
    /// Study program name
    #[serde(rename = "nama_prodi", default)]
    pub program_name: String,
}

impl StudentSummary {
    /// Institution name with its abbreviation appended, the way the
    /// registry displays it
    #[must_use]
    pub fn institution_display(&self) -> String {
        if self.institution_abbr.is_empty() {
            self.institution_name.clone()
        } else {
            format!("{} ({})", self.institution_name, self.institution_abbr)
        }
    }
}

/// The detail endpoint's enrollment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetail {
    /// Student name
    #[serde(rename = "nama", default)]
    pub name: String,
    /// Student identification number
    #[serde(default)]
    pub nim: String,
    /// Study program name
    #[serde(rename = "prodi", default)]
    pub program_name: String,
    /// Institution name
    #[serde(rename = "nama_pt", default)]
    pub institution_name: String,
    /// Sex code as stored by the registry ("L" or "P")
    #[serde(rename = "jenis_kelamin", default)]
    pub sex: String,
    /// Enrollment date as emitted by the API
    #[serde(rename = "tanggal_masuk", default)]
    pub enrolled_at: String,
    /// Initial enrollment status
    #[serde(rename = "jenis_daftar", default)]
    pub initial_status: String,
    /// Most recent enrollment status
    #[serde(rename = "status_saat_ini", default)]
    pub current_status: String,
}

impl StudentDetail {
    /// Sex code rendered as display text
    #[must_use]
    pub fn sex_display(&self) -> &'static str {
        sex_label(&self.sex)
    }

    /// Enrollment date rendered long-form in Indonesian
    #[must_use]
    pub fn enrolled_at_display(&self) -> String {
        format_enrollment_date(&self.enrolled_at)
    }
}

/// Translate the registry's binary sex code into display text.
///
/// `"L"` is male; the registry uses `"P"` for female but any other value
/// gets the same label.
#[must_use]
pub fn sex_label(code: &str) -> &'static str {
    if code == "L" { "Laki-Laki" } else { "Perempuan" }
}

/// Render an enrollment date long-form in Indonesian, e.g.
/// "Senin, 5 Agustus 2019".
///
/// The API emits either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
/// Anything unparseable is returned unchanged rather than dropped.
#[must_use]
pub fn format_enrollment_date(raw: &str) -> String {
    parse_api_date(raw).map_or_else(
        || raw.to_string(),
        |date| {
            date.format_localized("%A, %-d %B %Y", Locale::id_ID)
                .to_string()
        },
    )
}

fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_deserializes_wire_names() {
        let json = r#"{
            "id": "abc-123",
            "nama": "BUDI SANTOSO",
            "nim": "1906123456",
            "nama_pt": "Universitas Indonesia",
            "sinkatan_pt": "UI",
            "nama_prodi": "Ilmu Komputer"
        }"#;
        let s: StudentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, "abc-123");
        assert_eq!(s.name, "BUDI SANTOSO");
        assert_eq!(s.nim, "1906123456");
        assert_eq!(s.institution_display(), "Universitas Indonesia (UI)");
        assert_eq!(s.program_name, "Ilmu Komputer");
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let s: StudentSummary = serde_json::from_str(r#"{"nim": "123"}"#).unwrap();
        assert_eq!(s.nim, "123");
        assert!(s.name.is_empty());
        assert_eq!(s.institution_display(), "");
    }

    #[test]
    fn test_detail_deserializes_wire_names() {
        let json = r#"{
            "nama": "SITI AMINAH",
            "nim": "1806543210",
            "prodi": "Teknik Sipil",
            "nama_pt": "Institut Teknologi Bandung",
            "jenis_kelamin": "P",
            "tanggal_masuk": "2018-08-06",
            "jenis_daftar": "Peserta didik baru",
            "status_saat_ini": "Lulus"
        }"#;
        let d: StudentDetail = serde_json::from_str(json).unwrap();
        assert_eq!(d.name, "SITI AMINAH");
        assert_eq!(d.program_name, "Teknik Sipil");
        assert_eq!(d.sex_display(), "Perempuan");
        assert_eq!(d.current_status, "Lulus");
    }

    #[test]
    fn test_sex_label() {
        assert_eq!(sex_label("L"), "Laki-Laki");
        assert_eq!(sex_label("P"), "Perempuan");
        // Anything that is not exactly "L" gets the other label
        assert_eq!(sex_label(""), "Perempuan");
        assert_eq!(sex_label("l"), "Perempuan");
        assert_eq!(sex_label("X"), "Perempuan");
    }

    #[test]
    fn test_format_enrollment_date_bare() {
        // 2019-08-05 was a Monday
        assert_eq!(format_enrollment_date("2019-08-05"), "Senin, 5 Agustus 2019");
    }

    #[test]
    fn test_format_enrollment_date_rfc3339() {
        assert_eq!(
            format_enrollment_date("2019-08-05T00:00:00.000Z"),
            "Senin, 5 Agustus 2019"
        );
    }

    #[test]
    fn test_format_enrollment_date_naive_timestamp() {
        assert_eq!(
            format_enrollment_date("2019-08-05T00:00:00"),
            "Senin, 5 Agustus 2019"
        );
    }

    #[test]
    fn test_format_enrollment_date_fallback() {
        assert_eq!(format_enrollment_date("not a date"), "not a date");
        assert_eq!(format_enrollment_date(""), "");
    }
}
