use machaon_client::{
    about,
    composer::{FormEvent, RequestComposer, RequestDraft, SubmissionPhase, ValidationState},
    protocol::{processing_message, RequestResult, SubmissionOutcome},
    service::ServiceClient,
    verification::{EnvTokenProvider, VerificationProvider},
};
use serde::Serialize;
use std::{env, fs, io};
use tracing::Level;

const DEFAULT_DRAFT_PATH: &str = ".machaon_draft.json";

#[derive(Serialize)]
struct ComposerSummary {
    draft: RequestDraft,
    validation: ValidationState,
    phase: SubmissionPhase,
    submittable: bool,
}

#[derive(Serialize)]
struct SubmissionReport {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    outcome: SubmissionOutcome,
}

#[derive(Serialize)]
struct ResultReport {
    status: String,
    result: RequestResult,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  machaon_cli --version\n  \
  machaon_cli [--draft PATH] event '<form-event-json>'\n  \
  machaon_cli [--draft PATH] summary\n  \
  machaon_cli [--draft PATH] reset\n  \
  machaon_cli [--draft PATH] [--base-url URL] [--token TOKEN] submit\n  \
  machaon_cli [--base-url URL] lists\n  \
  machaon_cli [--base-url URL] info\n  \
  machaon_cli [--base-url URL] result HASH REQUEST_ID\n\n  \
  The base URL falls back to MACHAON_BASE_URL, the token to\n  \
  MACHAON_VERIFICATION_TOKEN. Tip: pass @file.json instead of inline JSON"
    );
}

fn load_json_arg(value: &str) -> Result<String, String> {
    if let Some(path) = value.strip_prefix('@') {
        fs::read_to_string(path).map_err(|e| format!("Could not read JSON file '{path}': {e}"))
    } else {
        Ok(value.to_string())
    }
}

fn load_composer(path: &str) -> Result<RequestComposer, String> {
    if std::path::Path::new(path).exists() {
        RequestComposer::load_from_path(path).map_err(|e| e.to_string())
    } else {
        Ok(RequestComposer::new())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Could not serialize JSON output: {e}"))?;
    println!("{text}");
    Ok(())
}

struct GlobalArgs {
    draft_path: String,
    base_url: Option<String>,
    token: Option<String>,
    cmd_idx: usize,
}

fn parse_global_args(args: &[String]) -> GlobalArgs {
    let mut globals = GlobalArgs {
        draft_path: DEFAULT_DRAFT_PATH.to_string(),
        base_url: None,
        token: None,
        cmd_idx: 1,
    };
    let mut idx = 1;
    while idx + 1 < args.len() {
        match args[idx].as_str() {
            "--draft" => globals.draft_path = args[idx + 1].clone(),
            "--base-url" => globals.base_url = Some(args[idx + 1].clone()),
            "--token" => globals.token = Some(args[idx + 1].clone()),
            _ => break,
        }
        idx += 2;
    }
    globals.cmd_idx = idx;
    globals
}

fn service_client(globals: &GlobalArgs) -> Result<ServiceClient, String> {
    match &globals.base_url {
        Some(base_url) => ServiceClient::new(base_url),
        None => ServiceClient::from_env(),
    }
}

fn summarize(composer: &RequestComposer) -> ComposerSummary {
    ComposerSummary {
        draft: composer.draft().clone(),
        validation: *composer.validation(),
        phase: composer.phase(),
        submittable: composer.can_submit(),
    }
}

fn main() {
    let level = if env::var("MACHAON_DEBUG").is_ok() {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        return Err("Missing command".to_string());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    let globals = parse_global_args(&args);
    if args.len() <= globals.cmd_idx {
        usage();
        return Err("Missing command".to_string());
    }

    let command = &args[globals.cmd_idx];

    match command.as_str() {
        "event" => {
            if args.len() <= globals.cmd_idx + 1 {
                usage();
                return Err("Missing form event JSON".to_string());
            }
            let json = load_json_arg(&args[globals.cmd_idx + 1])?;
            let event: FormEvent =
                serde_json::from_str(&json).map_err(|e| format!("Invalid form event JSON: {e}"))?;

            let mut composer = load_composer(&globals.draft_path)?;
            composer.apply(event).map_err(|e| e.to_string())?;
            composer
                .save_to_path(&globals.draft_path)
                .map_err(|e| e.to_string())?;
            print_json(&summarize(&composer))
        }
        "summary" => {
            let composer = load_composer(&globals.draft_path)?;
            print_json(&summarize(&composer))
        }
        "reset" => {
            if std::path::Path::new(&globals.draft_path).exists() {
                fs::remove_file(&globals.draft_path)
                    .map_err(|e| format!("Could not remove '{}': {e}", globals.draft_path))?;
            }
            println!("Draft '{}' cleared", globals.draft_path);
            Ok(())
        }
        "submit" => {
            let mut composer = load_composer(&globals.draft_path)?;
            let service = service_client(&globals)?;
            let provider = match &globals.token {
                Some(token) => EnvTokenProvider::with_token(token),
                None => EnvTokenProvider::new(),
            };
            let token = provider.request_token()?;

            let payload = composer.begin_submission(&token).map_err(|e| e.to_string())?;
            let outcome = service.submit(&payload);
            composer.resolve_submission().map_err(|e| e.to_string())?;
            composer
                .save_to_path(&globals.draft_path)
                .map_err(|e| e.to_string())?;

            print_json(&SubmissionReport {
                message: outcome.message(),
                link: outcome.link().map(str::to_string),
                outcome,
            })
        }
        "lists" => {
            let service = service_client(&globals)?;
            print_json(&service.candidate_lists()?)
        }
        "info" => {
            let service = service_client(&globals)?;
            print_json(&service.system_info()?)
        }
        "result" => {
            if args.len() <= globals.cmd_idx + 2 {
                usage();
                return Err("result requires: HASH REQUEST_ID".to_string());
            }
            let hash = &args[globals.cmd_idx + 1];
            let request_id: i64 = args[globals.cmd_idx + 2]
                .parse()
                .map_err(|e| format!("Invalid request id: {e}"))?;

            let service = service_client(&globals)?;
            let result = service.result_data(hash, request_id)?;
            let status = if result.request.id <= 0 {
                "This request has not been processed yet or it does not exist. \
                 Please review your link or visit again a while later."
                    .to_string()
            } else if result.request.secure_hash.is_empty() {
                processing_message(result.request.status_code).to_string()
            } else {
                "Completed".to_string()
            };
            print_json(&ResultReport { status, result })
        }
        _ => {
            usage();
            Err(format!("Unknown command '{command}'"))
        }
    }
}
