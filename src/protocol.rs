use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One server-curated preset candidate list, as returned by `GET /lists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateList {
    pub id: i32,
    pub title: String,
}

/// Network counters returned by `GET /info`. Display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub candidate_lists: i64,
    pub nodes: i64,
    pub jobs: i64,
    pub queued: i64,
}

/// Body of `POST /request`. The field names follow the service's JSON
/// contract, not this crate's naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub reference: String,
    pub custom_list: String,
    pub candidate_list: i32,
    pub go_term: String,
    pub meta: bool,
    pub comparison_mode: i32,
    pub segment_start: i32,
    pub segment_end: i32,
    pub token: String,
    pub alignment_level: i32,
}

/// Response of `POST /request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestResponse {
    pub status_code: i32,
    #[serde(default)]
    pub hash: String,
    #[serde(default = "default_request_id")]
    pub request_id: i64,
}

fn default_request_id() -> i64 {
    -1
}

/// Finalized request record returned by `GET /resultdata/{hash}/{id}`.
/// `creation_date` is passed through as text; the client only displays it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedRequest {
    pub id: i64,
    pub reference: String,
    pub candidates_list_id: i32,
    pub custom_list: String,
    #[serde(default)]
    pub uncached: String,
    pub hash_value: String,
    pub creation_date: String,
    pub meta: bool,
    pub go_term: String,
    pub comparison_mode: i8,
    pub segment_start: i32,
    pub segment_end: i32,
    pub alignment_level: i8,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub secure_hash: String,
    #[serde(default)]
    pub list_name: Option<String>,
    pub status_code: i8,
}

/// Full payload of `GET /resultdata/{hash}/{id}`: the stored request plus the
/// output filenames for the quick view, keyed by category (`cluster`, `top`,
/// `topHuman`, `goTerm`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestResult {
    pub request: FinalizedRequest,
    #[serde(default)]
    pub files: HashMap<String, Vec<String>>,
}

/// Terminal outcome of one submission attempt. Never persisted and never
/// retried; a new attempt requires an explicit re-submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    Queued {
        link: String,
        hash: String,
        request_id: i64,
    },
    Throttled,
    Rejected {
        code: i32,
        message: String,
    },
    UnknownError,
}

impl SubmissionOutcome {
    /// Human-readable message for this outcome.
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Queued { .. } => QUEUED_MESSAGE.to_string(),
            SubmissionOutcome::Throttled => THROTTLED_MESSAGE.to_string(),
            SubmissionOutcome::Rejected { message, .. } => message.clone(),
            SubmissionOutcome::UnknownError => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }

    /// The shareable result link, present only for a queued submission.
    pub fn link(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Queued { link, .. } => Some(link),
            _ => None,
        }
    }
}

pub const QUEUED_MESSAGE: &str =
    "Your request was queued. Please keep the following link and visit after a while:";
pub const THROTTLED_MESSAGE: &str = "Another request was just queued some moments ago. \
     We throttle the total request rate of all users due to limited resources. \
     Please try a while later.";
pub const UNKNOWN_ERROR_MESSAGE: &str =
    "Unknown error. Please check your input or the status of the service.";

/// Fixed message for a known submission status code, `None` for any code
/// outside the known mapping.
pub fn submission_message(code: i32) -> Option<&'static str> {
    match code {
        0 => Some(QUEUED_MESSAGE),
        -1 => Some("There is a problem with the provided reference id."),
        -2 => Some(THROTTLED_MESSAGE),
        -3 => Some("The selected candidate list identifier is not present in the system."),
        -4 | -5 | -6 => Some("Please re-check the custom list of candidates."),
        -7 => Some("Please re-check the choice of residue range."),
        -8 => Some("Your request was not validated by the verification provider. Please try again."),
        -9 => Some("Invalid option for comparison mode."),
        -10 => Some("Invalid option for segment alignment level."),
        _ => None,
    }
}

/// Shareable link to the result page of a queued request.
pub fn result_link(base_url: &str, hash: &str, request_id: i64) -> String {
    format!(
        "{}/result/{}/{}",
        base_url.trim_end_matches('/'),
        hash,
        request_id
    )
}

/// Map the response of `POST /request` to a terminal outcome. Code 0 carries
/// the shareable result link; every other known code is a fixed rejection;
/// anything else is the generic unknown error.
pub fn interpret_submission(base_url: &str, response: &RequestResponse) -> SubmissionOutcome {
    match response.status_code {
        0 => SubmissionOutcome::Queued {
            link: result_link(base_url, &response.hash, response.request_id),
            hash: response.hash.clone(),
            request_id: response.request_id,
        },
        -2 => SubmissionOutcome::Throttled,
        code => match submission_message(code) {
            Some(message) => SubmissionOutcome::Rejected {
                code,
                message: message.to_string(),
            },
            None => SubmissionOutcome::UnknownError,
        },
    }
}

/// Message for the processing status of an already-stored request, as shown
/// on the result page. This is a different code space from the submission
/// codes: 0 means still in the queue, positive codes are terminal failures.
pub fn processing_message(code: i8) -> &'static str {
    match code {
        0 => "This request is being processed and is not available yet. Please visit again later.",
        3 => "[Request failed] The reference did not include a chain ID as suffix.",
        4 => "[Request failed] Malformed values in request.",
        5 => "[Request failed] Erroneous value for preset list was given.",
        7 | 9 => {
            "[Request failed] Reference structure was not able to be retrieved. \
             Please review the reference structure id and try again."
        }
        8 => {
            "[Request failed] No structure was able to be retrieved. \
             Please review your inputs and try again."
        }
        _ => {
            "[Request failed] There was an unknown error. Please try again by checking \
             your input or the status of the service. If the problem persists, please contact us."
        }
    }
}
