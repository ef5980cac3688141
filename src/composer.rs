use crate::identifier::{extract_composite_id, extract_structure_id, CompositeId, StructureId};
use crate::protocol::RequestPayload;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Granularity of a structural comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonMode {
    Whole,
    Domain,
    Segment,
}

/// Representation used to pre-select candidates in segment comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentLevel {
    Primary,
    Secondary,
    Hydrophobicity,
    #[default]
    Mixed,
}

impl AlignmentLevel {
    pub fn wire_value(&self) -> i32 {
        match self {
            AlignmentLevel::Primary => 0,
            AlignmentLevel::Secondary => 1,
            AlignmentLevel::Hydrophobicity => 2,
            AlignmentLevel::Mixed => 3,
        }
    }
}

/// Residue range for segment comparisons, bounds already checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidueRange {
    start: i32,
    end: i32,
}

impl ResidueRange {
    /// Parse user input of the form `10-100`. The range must satisfy
    /// `0 < start < end < 10000` and `2 < end - start < 600`.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() != 2 {
            return None;
        }
        let start: i32 = parts[0].trim().parse().ok()?;
        let end: i32 = parts[1].trim().parse().ok()?;
        if start < end
            && end < 10000
            && start < 10000
            && end > 0
            && start > 0
            && end - start < 600
            && end - start > 2
        {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }
}

/// Comparison selection held by the draft. Only the segment variant carries a
/// residue range and an alignment level; the other modes have no use for
/// either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ComparisonSelection {
    #[default]
    Whole,
    Domain,
    Segment {
        range: Option<ResidueRange>,
        alignment_level: AlignmentLevel,
    },
}

impl ComparisonSelection {
    pub fn mode(&self) -> ComparisonMode {
        match self {
            ComparisonSelection::Whole => ComparisonMode::Whole,
            ComparisonSelection::Domain => ComparisonMode::Domain,
            ComparisonSelection::Segment { .. } => ComparisonMode::Segment,
        }
    }

    pub fn is_segment(&self) -> bool {
        matches!(self, ComparisonSelection::Segment { .. })
    }

    pub fn mode_wire_value(&self) -> i32 {
        match self {
            ComparisonSelection::Whole => 0,
            ComparisonSelection::Domain => 1,
            ComparisonSelection::Segment { .. } => 2,
        }
    }
}

/// The in-progress request. Owned by one composer for the life of a form
/// session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestDraft {
    pub reference: Option<CompositeId>,
    pub candidate_list: Option<i32>,
    pub custom_list: Vec<StructureId>,
    pub comparison: ComparisonSelection,
    pub meta: bool,
    pub go_term: String,
}

/// Per-field validity. `Unknown` means the field has not been touched yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValidity {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationState {
    pub reference: FieldValidity,
    pub custom_list: FieldValidity,
    pub residue_range: FieldValidity,
}

/// One user interaction with the request form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FormEvent {
    ReferenceEdited { text: String },
    CustomListEdited { text: String },
    PresetSelected { list_id: Option<i32> },
    ComparisonModeSelected { mode: ComparisonMode },
    ResidueRangeEdited { text: String },
    AlignmentLevelSelected { level: AlignmentLevel },
    MetaToggled { enabled: bool },
    GoTermEdited { text: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum ComposerErrorCode {
    InvalidInput,
    NotSubmittable,
    InFlight,
    Io,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposerError {
    pub code: ComposerErrorCode,
    pub message: String,
}

impl fmt::Display for ComposerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for ComposerError {}

/// Whether a submission is currently in flight. The submit gate is closed for
/// the whole in-flight window; there is exactly one terminal transition back
/// to `Editing` per attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    InFlight,
}

/// Owns the draft and its validation state for one form session. All
/// mutations go through [`RequestComposer::apply`], so the submit gate is
/// testable without any UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestComposer {
    draft: RequestDraft,
    validation: ValidationState,
    phase: SubmissionPhase,
}

impl RequestComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_path(path: &str) -> Result<Self, ComposerError> {
        let text = std::fs::read_to_string(path).map_err(|e| ComposerError {
            code: ComposerErrorCode::Io,
            message: format!("Could not read draft file '{path}': {e}"),
        })?;
        serde_json::from_str(&text).map_err(|e| ComposerError {
            code: ComposerErrorCode::InvalidInput,
            message: format!("Could not parse draft JSON '{path}': {e}"),
        })
    }

    pub fn save_to_path(&self, path: &str) -> Result<(), ComposerError> {
        let text = serde_json::to_string_pretty(self).map_err(|e| ComposerError {
            code: ComposerErrorCode::Io,
            message: format!("Could not serialize draft: {e}"),
        })?;
        std::fs::write(path, text).map_err(|e| ComposerError {
            code: ComposerErrorCode::Io,
            message: format!("Could not write draft file '{path}': {e}"),
        })
    }

    pub fn draft(&self) -> &RequestDraft {
        &self.draft
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// The submit gate. True iff the reference is valid, a candidate source
    /// is settled (preset chosen or custom list valid), the residue range is
    /// valid when segment mode is selected, and no submission is in flight.
    pub fn can_submit(&self) -> bool {
        let candidates_ok = self.draft.candidate_list.is_some()
            || self.validation.custom_list == FieldValidity::Valid;
        let range_ok = !self.draft.comparison.is_segment()
            || self.validation.residue_range == FieldValidity::Valid;
        self.validation.reference == FieldValidity::Valid
            && candidates_ok
            && range_ok
            && self.phase == SubmissionPhase::Editing
    }

    /// Apply one form event to the draft. Events for controls that are not
    /// present in the current mode are rejected.
    pub fn apply(&mut self, event: FormEvent) -> Result<(), ComposerError> {
        match event {
            FormEvent::ReferenceEdited { text } => {
                match extract_composite_id(text.trim()) {
                    Some(id) => {
                        self.draft.reference = Some(id);
                        self.validation.reference = FieldValidity::Valid;
                    }
                    None => {
                        self.validation.reference = FieldValidity::Invalid;
                    }
                }
                Ok(())
            }
            FormEvent::CustomListEdited { text } => {
                let text = text.trim();
                if text.is_empty() {
                    self.validation.custom_list = FieldValidity::Unknown;
                    return Ok(());
                }
                let mut extracted: Vec<StructureId> = Vec::new();
                let mut failed = false;
                for piece in text.split(',') {
                    let piece = piece.trim();
                    if piece.is_empty() {
                        continue;
                    }
                    // Fail fast: the first bad token invalidates the field
                    match extract_structure_id(piece) {
                        Some(id) => extracted.push(id),
                        None => {
                            failed = true;
                            break;
                        }
                    }
                }
                if failed || extracted.is_empty() {
                    self.validation.custom_list = FieldValidity::Invalid;
                } else {
                    // A usable custom list supersedes any preset selection
                    self.draft.candidate_list = None;
                    self.draft.custom_list = extracted;
                    self.validation.custom_list = FieldValidity::Valid;
                }
                Ok(())
            }
            FormEvent::PresetSelected { list_id } => {
                if list_id.is_some() && self.draft.comparison.is_segment() {
                    return Err(ComposerError {
                        code: ComposerErrorCode::InvalidInput,
                        message: "Preset lists are not available for segment comparisons"
                            .to_string(),
                    });
                }
                self.draft.candidate_list = list_id;
                self.draft.custom_list.clear();
                Ok(())
            }
            FormEvent::ComparisonModeSelected { mode } => {
                self.draft.comparison = match mode {
                    ComparisonMode::Whole => ComparisonSelection::Whole,
                    ComparisonMode::Domain => ComparisonSelection::Domain,
                    ComparisonMode::Segment => {
                        // Segment comparisons have no preset lists
                        self.draft.candidate_list = None;
                        ComparisonSelection::Segment {
                            range: None,
                            alignment_level: AlignmentLevel::default(),
                        }
                    }
                };
                self.validation.residue_range = FieldValidity::Unknown;
                Ok(())
            }
            FormEvent::ResidueRangeEdited { text } => {
                let ComparisonSelection::Segment {
                    range,
                    alignment_level: _,
                } = &mut self.draft.comparison
                else {
                    return Err(ComposerError {
                        code: ComposerErrorCode::InvalidInput,
                        message: "A residue range applies to segment comparisons only".to_string(),
                    });
                };
                match ResidueRange::parse(text.trim()) {
                    Some(parsed) => {
                        *range = Some(parsed);
                        self.validation.residue_range = FieldValidity::Valid;
                    }
                    None => {
                        *range = None;
                        self.validation.residue_range = FieldValidity::Invalid;
                    }
                }
                Ok(())
            }
            FormEvent::AlignmentLevelSelected { level } => {
                let ComparisonSelection::Segment {
                    range: _,
                    alignment_level,
                } = &mut self.draft.comparison
                else {
                    return Err(ComposerError {
                        code: ComposerErrorCode::InvalidInput,
                        message: "An alignment level applies to segment comparisons only"
                            .to_string(),
                    });
                };
                *alignment_level = level;
                Ok(())
            }
            FormEvent::MetaToggled { enabled } => {
                self.draft.meta = enabled;
                if !enabled {
                    self.draft.go_term.clear();
                }
                Ok(())
            }
            FormEvent::GoTermEdited { text } => {
                // Disallowed characters are stripped, never rejected
                self.draft.go_term = text
                    .trim()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
                    .collect();
                Ok(())
            }
        }
    }

    /// Open the in-flight window and produce the wire payload. Fails when the
    /// gate is closed; the caller must hand the terminal outcome back through
    /// [`RequestComposer::resolve_submission`].
    pub fn begin_submission(&mut self, token: &str) -> Result<RequestPayload, ComposerError> {
        if self.phase == SubmissionPhase::InFlight {
            return Err(ComposerError {
                code: ComposerErrorCode::InFlight,
                message: "A submission is already in flight".to_string(),
            });
        }
        if !self.can_submit() {
            return Err(ComposerError {
                code: ComposerErrorCode::NotSubmittable,
                message: "The request is not complete enough to submit".to_string(),
            });
        }
        self.phase = SubmissionPhase::InFlight;
        Ok(self.payload(token))
    }

    /// Close the in-flight window after the outcome of the attempt has been
    /// handled. The composer returns to an editable state; nothing is retried.
    pub fn resolve_submission(&mut self) -> Result<(), ComposerError> {
        if self.phase != SubmissionPhase::InFlight {
            return Err(ComposerError {
                code: ComposerErrorCode::InvalidInput,
                message: "No submission is in flight".to_string(),
            });
        }
        self.phase = SubmissionPhase::Editing;
        Ok(())
    }

    fn payload(&self, token: &str) -> RequestPayload {
        let (segment_start, segment_end, alignment_level) = match self.draft.comparison {
            ComparisonSelection::Segment {
                range,
                alignment_level,
            } => {
                let (start, end) = range.map(|r| (r.start(), r.end())).unwrap_or((-1, -1));
                (start, end, alignment_level.wire_value())
            }
            _ => (-1, -1, AlignmentLevel::default().wire_value()),
        };
        RequestPayload {
            reference: self
                .draft
                .reference
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            custom_list: self.draft.custom_list.iter().join(","),
            candidate_list: self.draft.candidate_list.unwrap_or(-1),
            go_term: self.draft.go_term.clone(),
            meta: self.draft.meta,
            comparison_mode: self.draft.comparison.mode_wire_value(),
            segment_start,
            segment_end,
            token: token.to_string(),
            alignment_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer_with_reference() -> RequestComposer {
        let mut composer = RequestComposer::new();
        composer
            .apply(FormEvent::ReferenceEdited {
                text: "6VXX_A".to_string(),
            })
            .unwrap();
        composer
    }

    #[test]
    fn test_gate_closed_on_fresh_composer() {
        let composer = RequestComposer::new();
        assert!(!composer.can_submit());
    }

    #[test]
    fn test_gate_requires_valid_reference() {
        let mut composer = RequestComposer::new();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "6VXX,3D0H".to_string(),
            })
            .unwrap();
        assert!(!composer.can_submit());

        composer
            .apply(FormEvent::ReferenceEdited {
                text: "not an id".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().reference, FieldValidity::Invalid);
        assert!(!composer.can_submit());

        composer
            .apply(FormEvent::ReferenceEdited {
                text: "6VXX_A".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().reference, FieldValidity::Valid);
        assert!(composer.can_submit());
    }

    #[test]
    fn test_invalid_reference_keeps_previous_value() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::ReferenceEdited {
                text: "garbage".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().reference, FieldValidity::Invalid);
        assert_eq!(
            composer.draft().reference.as_ref().unwrap().to_string(),
            "6VXX_A"
        );
    }

    #[test]
    fn test_gate_accepts_preset_in_place_of_custom_list() {
        let mut composer = composer_with_reference();
        assert!(!composer.can_submit());
        composer
            .apply(FormEvent::PresetSelected { list_id: Some(3) })
            .unwrap();
        assert!(composer.can_submit());
        assert_eq!(composer.validation().custom_list, FieldValidity::Unknown);
    }

    #[test]
    fn test_custom_list_fail_fast() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "6VXX,BADID,3D0H".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().custom_list, FieldValidity::Invalid);
        assert!(composer.draft().custom_list.is_empty());
        assert!(!composer.can_submit());
    }

    #[test]
    fn test_custom_list_normalization() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: " 6VXX , ,3D0H, ".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().custom_list, FieldValidity::Valid);
        let normalized: Vec<&str> = composer
            .draft()
            .custom_list
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(normalized, vec!["6VXX", "3D0H"]);
        assert!(composer.can_submit());
    }

    #[test]
    fn test_custom_list_empty_input_is_unknown() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "   ".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().custom_list, FieldValidity::Unknown);
        assert!(!composer.can_submit());
    }

    #[test]
    fn test_custom_list_all_blank_pieces_is_invalid() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: ",".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().custom_list, FieldValidity::Invalid);
    }

    #[test]
    fn test_valid_custom_list_clears_preset() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::PresetSelected { list_id: Some(2) })
            .unwrap();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "MGYP000740062793".to_string(),
            })
            .unwrap();
        assert_eq!(composer.draft().candidate_list, None);
        assert!(composer.can_submit());
    }

    #[test]
    fn test_preset_clears_custom_list() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "6VXX,3D0H".to_string(),
            })
            .unwrap();
        composer
            .apply(FormEvent::PresetSelected { list_id: Some(1) })
            .unwrap();
        assert_eq!(composer.draft().candidate_list, Some(1));
        assert!(composer.draft().custom_list.is_empty());
        assert!(composer.can_submit());
    }

    #[test]
    fn test_residue_range_bounds() {
        assert!(ResidueRange::parse("10-100").is_some());
        assert!(ResidueRange::parse("100-10").is_none());
        assert!(ResidueRange::parse("1-2").is_none());
        assert!(ResidueRange::parse("1-3").is_none());
        assert!(ResidueRange::parse("1-4").is_some());
        assert!(ResidueRange::parse("1-700").is_none());
        assert!(ResidueRange::parse("1-600").is_some());
        assert!(ResidueRange::parse("1-601").is_none());
        assert!(ResidueRange::parse("9400-9990").is_some());
        assert!(ResidueRange::parse("9990-10000").is_none());
        assert!(ResidueRange::parse("0-100").is_none());
        assert!(ResidueRange::parse("abc-100").is_none());
        assert!(ResidueRange::parse("10-100-200").is_none());
        assert!(ResidueRange::parse("10").is_none());
    }

    #[test]
    fn test_segment_mode_gates_on_residue_range() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "6VXX,3D0H".to_string(),
            })
            .unwrap();
        composer
            .apply(FormEvent::ComparisonModeSelected {
                mode: ComparisonMode::Segment,
            })
            .unwrap();
        assert!(!composer.can_submit());

        composer
            .apply(FormEvent::ResidueRangeEdited {
                text: "100-10".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().residue_range, FieldValidity::Invalid);
        assert!(!composer.can_submit());

        composer
            .apply(FormEvent::ResidueRangeEdited {
                text: "10-100".to_string(),
            })
            .unwrap();
        assert_eq!(composer.validation().residue_range, FieldValidity::Valid);
        assert!(composer.can_submit());
    }

    #[test]
    fn test_segment_mode_clears_preset() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::PresetSelected { list_id: Some(4) })
            .unwrap();
        composer
            .apply(FormEvent::ComparisonModeSelected {
                mode: ComparisonMode::Segment,
            })
            .unwrap();
        assert_eq!(composer.draft().candidate_list, None);
    }

    #[test]
    fn test_preset_selection_rejected_in_segment_mode() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::ComparisonModeSelected {
                mode: ComparisonMode::Segment,
            })
            .unwrap();
        assert!(composer
            .apply(FormEvent::PresetSelected { list_id: Some(1) })
            .is_err());
    }

    #[test]
    fn test_leaving_segment_mode_resets_range_validity() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::ComparisonModeSelected {
                mode: ComparisonMode::Segment,
            })
            .unwrap();
        composer
            .apply(FormEvent::ResidueRangeEdited {
                text: "10-100".to_string(),
            })
            .unwrap();
        composer
            .apply(FormEvent::ComparisonModeSelected {
                mode: ComparisonMode::Whole,
            })
            .unwrap();
        composer
            .apply(FormEvent::ComparisonModeSelected {
                mode: ComparisonMode::Segment,
            })
            .unwrap();
        // Re-entering segment mode starts from an empty range again
        assert_eq!(composer.validation().residue_range, FieldValidity::Unknown);
        assert!(!composer.can_submit());
    }

    #[test]
    fn test_range_events_rejected_outside_segment_mode() {
        let mut composer = composer_with_reference();
        assert!(composer
            .apply(FormEvent::ResidueRangeEdited {
                text: "10-100".to_string(),
            })
            .is_err());
        assert!(composer
            .apply(FormEvent::AlignmentLevelSelected {
                level: AlignmentLevel::Primary,
            })
            .is_err());
    }

    #[test]
    fn test_meta_off_clears_go_term() {
        let mut composer = RequestComposer::new();
        composer
            .apply(FormEvent::MetaToggled { enabled: true })
            .unwrap();
        composer
            .apply(FormEvent::GoTermEdited {
                text: "angiogenesis".to_string(),
            })
            .unwrap();
        assert_eq!(composer.draft().go_term, "angiogenesis");
        composer
            .apply(FormEvent::MetaToggled { enabled: false })
            .unwrap();
        assert_eq!(composer.draft().go_term, "");
    }

    #[test]
    fn test_go_term_strips_disallowed_characters() {
        let mut composer = RequestComposer::new();
        composer
            .apply(FormEvent::GoTermEdited {
                text: "angio-genesis! (GO:0001525)".to_string(),
            })
            .unwrap();
        assert_eq!(composer.draft().go_term, "angiogenesis GO0001525");
    }

    #[test]
    fn test_validator_idempotence() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "6VXX,3D0H".to_string(),
            })
            .unwrap();
        let first = composer.draft().clone();
        composer
            .apply(FormEvent::ReferenceEdited {
                text: "6VXX_A".to_string(),
            })
            .unwrap();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "6VXX,3D0H".to_string(),
            })
            .unwrap();
        assert_eq!(
            first.reference.as_ref().unwrap().to_string(),
            composer.draft().reference.as_ref().unwrap().to_string()
        );
        assert_eq!(first.custom_list, composer.draft().custom_list);
        assert_eq!(composer.validation().custom_list, FieldValidity::Valid);
        assert!(composer.can_submit());
    }

    #[test]
    fn test_single_flight_submission() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::PresetSelected { list_id: Some(1) })
            .unwrap();
        let payload = composer.begin_submission("token-1").unwrap();
        assert_eq!(payload.token, "token-1");
        assert_eq!(composer.phase(), SubmissionPhase::InFlight);
        assert!(!composer.can_submit());
        assert!(composer.begin_submission("token-2").is_err());

        composer.resolve_submission().unwrap();
        assert_eq!(composer.phase(), SubmissionPhase::Editing);
        assert!(composer.can_submit());
        assert!(composer.resolve_submission().is_err());
    }

    #[test]
    fn test_payload_for_whole_comparison() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "6VXX,3D0H".to_string(),
            })
            .unwrap();
        let payload = composer.begin_submission("tok").unwrap();
        assert_eq!(payload.reference, "6VXX_A");
        assert_eq!(payload.custom_list, "6VXX,3D0H");
        assert_eq!(payload.candidate_list, -1);
        assert_eq!(payload.comparison_mode, 0);
        assert_eq!(payload.segment_start, -1);
        assert_eq!(payload.segment_end, -1);
        assert_eq!(payload.alignment_level, 3);
    }

    #[test]
    fn test_payload_for_segment_comparison() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "AF-P00533-F1-model_v4".to_string(),
            })
            .unwrap();
        composer
            .apply(FormEvent::ComparisonModeSelected {
                mode: ComparisonMode::Segment,
            })
            .unwrap();
        composer
            .apply(FormEvent::ResidueRangeEdited {
                text: "10-100".to_string(),
            })
            .unwrap();
        composer
            .apply(FormEvent::AlignmentLevelSelected {
                level: AlignmentLevel::Secondary,
            })
            .unwrap();
        let payload = composer.begin_submission("tok").unwrap();
        assert_eq!(payload.comparison_mode, 2);
        assert_eq!(payload.segment_start, 10);
        assert_eq!(payload.segment_end, 100);
        assert_eq!(payload.alignment_level, 1);
        assert_eq!(payload.custom_list, "AF-P00533-F1-model_v4");
    }

    #[test]
    fn test_draft_round_trip_through_file() {
        let mut composer = composer_with_reference();
        composer
            .apply(FormEvent::CustomListEdited {
                text: "6VXX,3D0H".to_string(),
            })
            .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        let path = path.to_str().unwrap();
        composer.save_to_path(path).unwrap();
        let restored = RequestComposer::load_from_path(path).unwrap();
        assert_eq!(
            restored.draft().reference.as_ref().unwrap().to_string(),
            "6VXX_A"
        );
        assert_eq!(restored.draft().custom_list, composer.draft().custom_list);
        assert!(restored.can_submit());
    }
}
