// ABOUTME: Export/import document bundling all mapping store families with a timestamp
// ABOUTME: Families are optional so partial documents overwrite only what they carry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::storage::EXPORT_FORMAT_VERSION;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{MappingStatistics, UnmappedObservation, UserMapping};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialized snapshot of the mapping store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    /// Document format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// When the snapshot was taken
    pub exported_at: DateTime<Utc>,
    /// User mappings family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_mappings: Option<Vec<UserMapping>>,
    /// Unmapped observations family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmapped: Option<Vec<UnmappedObservation>>,
    /// Statistics singleton
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<MappingStatistics>,
}

const fn default_version() -> u32 {
    EXPORT_FORMAT_VERSION
}

impl ExportSnapshot {
    /// Snapshot carrying every family
    #[must_use]
    pub fn new(
        user_mappings: Vec<UserMapping>,
        unmapped: Vec<UnmappedObservation>,
        statistics: MappingStatistics,
    ) -> Self {
        Self {
            version: EXPORT_FORMAT_VERSION,
            exported_at: Utc::now(),
            user_mappings: Some(user_mappings),
            unmapped: Some(unmapped),
            statistics: Some(statistics),
        }
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a snapshot document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON, has the wrong
    /// shape, comes from a newer format version, or carries records with
    /// out-of-range values
    pub fn from_json(json: &str) -> AppResult<Self> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| AppError::invalid_format(format!("Malformed export document: {e}")))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> AppResult<()> {
        if self.version > EXPORT_FORMAT_VERSION {
            return Err(AppError::invalid_format(format!(
                "Unsupported export version {} (max {EXPORT_FORMAT_VERSION})",
                self.version
            )));
        }

        for mapping in self.user_mappings.iter().flatten() {
            if mapping.query.trim().is_empty() || mapping.exercise_id.is_empty() {
                return Err(AppError::invalid_format(
                    "User mapping with empty query or exercise id",
                ));
            }
            if !(0.0..=1.0).contains(&mapping.confidence) {
                return Err(AppError::new(
                    ErrorCode::ValueOutOfRange,
                    format!(
                    "User mapping '{}' has confidence {} outside 0.0-1.0",
                        mapping.query, mapping.confidence
                    ),
                ));
            }
        }

        for observation in self.unmapped.iter().flatten() {
            if observation.occurrence_count == 0 {
                return Err(AppError::new(
                    ErrorCode::ValueOutOfRange,
                    format!(
                        "Unmapped observation '{}' has zero occurrences",
                        observation.query
                    ),
                ));
            }
        }

        if let Some(statistics) = &self.statistics {
            if statistics.successful_matches > statistics.total_attempts {
                return Err(AppError::new(
                    ErrorCode::ValueOutOfRange,
                    "Statistics report more successful matches than attempts",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MappingSource;

    #[test]
    fn test_partial_document_parses() {
        let snapshot = ExportSnapshot::from_json(r#"{"exported_at": "2025-01-01T00:00:00Z"}"#)
            .unwrap();
        assert_eq!(snapshot.version, EXPORT_FORMAT_VERSION);
        assert!(snapshot.user_mappings.is_none());
        assert!(snapshot.unmapped.is_none());
        assert!(snapshot.statistics.is_none());
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(ExportSnapshot::from_json("not json").is_err());
        assert!(ExportSnapshot::from_json(r#"{"user_mappings": []}"#).is_err());
        assert!(ExportSnapshot::from_json(
            r#"{"version": 99, "exported_at": "2025-01-01T00:00:00Z"}"#
        )
        .is_err());
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let mut mapping = UserMapping::new("db row", "dumbbell-row", 1.0, MappingSource::Manual);
        mapping.confidence = 3.0;
        let snapshot = ExportSnapshot {
            user_mappings: Some(vec![mapping]),
            ..ExportSnapshot::new(vec![], vec![], MappingStatistics::default())
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let error = ExportSnapshot::from_json(&json).unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_rejects_inconsistent_statistics() {
        let statistics = MappingStatistics {
            total_attempts: 1,
            successful_matches: 2,
            ..MappingStatistics::default()
        };
        let snapshot = ExportSnapshot::new(vec![], vec![], statistics);
        let json = serde_json::to_string(&snapshot).unwrap();
        let error = ExportSnapshot::from_json(&json).unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }
}
