//! Student record synthesis
//!
//! Every retained identity becomes one [`StudentRecord`]. Identifiers come from
//! the position in the filtered sequence only. The placeholder fields are
//! owned by the mobile application, which fills them on-device, so they are
//! always serialized and always unset here.

use crate::scanner::PersonEntry;
use serde::{Deserialize, Serialize};

/// Prefix of the primary record identifier (`lfw_00001`)
pub const STUDENT_ID_PREFIX: &str = "lfw_";

/// Prefix of the display identifier (`LFW00001`)
pub const DISPLAY_ID_PREFIX: &str = "LFW";

/// Cohort labels stamped on every record of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cohort {
    pub class_name: String,
    pub grade: String,
}

impl Default for Cohort {
    fn default() -> Self {
        Self {
            class_name: "LFW Test Class".to_string(),
            grade: "Test".to_string(),
        }
    }
}

/// Import-side information kept next to the consumer-facing fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportProvenance {
    #[serde(rename = "_lfw_dir")]
    pub source_dir: String,
    #[serde(rename = "_lfw_images")]
    pub source_images: Vec<String>,
    #[serde(rename = "_primary_image")]
    pub primary_image: Option<String>,
}

/// Normalized output record for one retained identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    /// Display identifier shown by the consumer as the student number
    pub student_id: String,
    pub name: String,
    pub class_name: String,
    pub grade: String,
    pub avatar_url: Option<String>,
    pub photo_url: Option<String>,
    pub parent_contact: Option<String>,
    pub face_feature_id: Option<String>,
    pub face_feature: Option<Vec<f32>>,
    pub is_enrolled: bool,
    pub tags: Vec<String>,
    pub academic_info: Option<serde_json::Value>,
    pub behavior_record: Option<serde_json::Value>,
    #[serde(flatten)]
    pub provenance: ImportProvenance,
}

impl StudentRecord {
    /// Create the record for the identity at 1-based position `index`
    pub fn new(index: usize, entry: &PersonEntry, cohort: &Cohort) -> Self {
        Self {
            id: format_student_id(index),
            student_id: format_display_id(index),
            name: entry.display_name().to_owned(),
            class_name: cohort.class_name.clone(),
            grade: cohort.grade.clone(),
            avatar_url: None,
            photo_url: None,
            parent_contact: None,
            face_feature_id: None,
            face_feature: None,
            is_enrolled: false,
            tags: Vec::new(),
            academic_info: None,
            behavior_record: None,
            provenance: ImportProvenance {
                source_dir: entry.directory_name().to_owned(),
                source_images: entry.images().to_vec(),
                primary_image: entry.primary_image().map(str::to_owned),
            },
        }
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.provenance.primary_image.as_deref()
    }

    /// Whether every consumer-owned field still holds its unset value
    pub fn placeholders_unset(&self) -> bool {
        self.avatar_url.is_none()
            && self.photo_url.is_none()
            && self.parent_contact.is_none()
            && self.face_feature_id.is_none()
            && self.face_feature.is_none()
            && !self.is_enrolled
            && self.tags.is_empty()
            && self.academic_info.is_none()
            && self.behavior_record.is_none()
    }
}

pub fn format_student_id(index: usize) -> String {
    format!("{STUDENT_ID_PREFIX}{index:05}")
}

pub fn format_display_id(index: usize) -> String {
    format!("{DISPLAY_ID_PREFIX}{index:05}")
}

/// Build one record per entry, numbered 1..=N in sequence order
pub fn build_records(entries: &[PersonEntry], cohort: &Cohort) -> Vec<StudentRecord> {
    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| StudentRecord::new(position + 1, entry, cohort))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;

    fn person(name: &str, count: usize) -> PersonEntry {
        let images = (1..=count).map(|i| format!("{name}_{i:04}.jpg")).collect();
        PersonEntry::new(name, images)
    }

    #[test]
    fn ids_are_dense_and_zero_padded() {
        let entries = vec![person("Zed", 1), person("Amy", 2), person("Bob", 3)];
        let records = build_records(&entries, &Cohort::default());

        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["lfw_00001", "lfw_00002", "lfw_00003"]);
        assert_eq!(records[2].student_id, "LFW00003");
    }

    #[test]
    fn numbering_follows_filtered_sequence() {
        let entries = vec![person("A", 2), person("B", 5), person("C", 1), person("D", 3)];
        let records = build_records(&filter(entries, 2, 0), &Cohort::default());

        let pairs: Vec<_> = records
            .iter()
            .map(|r| (r.id.as_str(), r.provenance.source_dir.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("lfw_00001", "A"), ("lfw_00002", "B"), ("lfw_00003", "D")]
        );
    }

    #[test]
    fn record_carries_names_and_provenance() {
        let entry = person("George_W_Bush", 2);
        let record = StudentRecord::new(7, &entry, &Cohort::default());

        assert_eq!(record.name, "George W Bush");
        assert_eq!(record.primary_image(), Some("George_W_Bush_0001.jpg"));
        assert_eq!(record.provenance.source_images.len(), 2);
        assert_eq!(record.class_name, "LFW Test Class");
        assert!(record.placeholders_unset());
    }

    #[test]
    fn identity_without_images_has_no_primary_image() {
        let record = StudentRecord::new(1, &person("Nobody", 0), &Cohort::default());
        assert_eq!(record.primary_image(), None);
    }

    #[test]
    fn placeholders_are_serialized_as_unset() {
        let record = StudentRecord::new(1, &person("Ann", 1), &Cohort::default());
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "avatarUrl",
            "photoUrl",
            "parentContact",
            "faceFeatureId",
            "faceFeature",
            "academicInfo",
            "behaviorRecord",
        ] {
            assert!(object.get(key).is_some_and(serde_json::Value::is_null), "{key}");
        }
        assert_eq!(object["isEnrolled"], serde_json::Value::Bool(false));
        assert_eq!(object["tags"], serde_json::json!([]));
        assert_eq!(object["studentId"], "LFW00001");
        assert_eq!(object["_lfw_dir"], "Ann");
        assert!(object["_lfw_images"].is_array());
        assert_eq!(object["_primary_image"], "Ann_0001.jpg");
    }

    #[test]
    fn custom_cohort_is_applied_to_every_record() {
        let cohort = Cohort {
            class_name: "Class 3".to_string(),
            grade: "Grade 7".to_string(),
        };
        let records = build_records(&[person("A", 1), person("B", 1)], &cohort);
        assert!(records
            .iter()
            .all(|r| r.class_name == "Class 3" && r.grade == "Grade 7"));
    }
}
