//! End-to-end translation flows against scripted backends.

use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

use editrans_application::{TranslationObserver, TranslationOrchestrator, TranslationUseCase};
use editrans_core::error::{EditransError, Result, TRANSLATION_FAILED_MESSAGE};
use editrans_core::session::{ModelTier, TranslationFormat, TranslationStatus};
use editrans_core::state::{InMemoryStateRepository, StateKey};
use editrans_core::translation::{
    FAST_MODEL, FragmentStream, TierProfiles, TranslationBackend, TranslationRequest,
};
use editrans_core::TranslationFailure;

/// Replays a fixed fragment script and records every request.
#[derive(Default)]
struct ScriptedBackend {
    script: Vec<Result<String>>,
    requests: Mutex<Vec<TranslationRequest>>,
}

impl ScriptedBackend {
    fn new(script: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            script,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TranslationBackend for ScriptedBackend {
    async fn stream_translation(&self, request: TranslationRequest) -> Result<FragmentStream> {
        self.requests.lock().unwrap().push(request);
        Ok(stream::iter(self.script.clone()).boxed())
    }
}

/// Emits one fragment, then holds the stream open until the gate opens.
struct GatedBackend {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    calls: AtomicUsize,
}

#[async_trait]
impl TranslationBackend for GatedBackend {
    async fn stream_translation(&self, _request: TranslationRequest) -> Result<FragmentStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().take().expect("gate is single use");
        let head = stream::iter(vec![Ok("first ".to_string())]);
        let tail = stream::once(async move {
            let _ = gate.await;
            Ok("second".to_string())
        });
        Ok(head.chain(tail).boxed())
    }
}

/// Records what the use case reports, plus the status seen mid-stream.
#[derive(Default)]
struct Recorder {
    statuses: Vec<TranslationStatus>,
    fragments: Vec<String>,
}

impl TranslationObserver for Recorder {
    fn on_status(&mut self, status: TranslationStatus) {
        self.statuses.push(status);
    }

    fn on_fragment(&mut self, text: &str) {
        self.fragments.push(text.to_string());
    }
}

fn orchestrator(backend: Arc<dyn TranslationBackend>) -> TranslationOrchestrator {
    TranslationOrchestrator::new(backend, TierProfiles::default()).unwrap()
}

async fn open(repository: &Arc<InMemoryStateRepository>) -> TranslationUseCase {
    TranslationUseCase::open(repository.clone()).await
}

#[tokio::test]
async fn test_full_translation_success() {
    let repository = Arc::new(InMemoryStateRepository::new());
    let backend = ScriptedBackend::new(vec![
        Ok("প্রকল্পটি ".to_string()),
        Ok("জটিলতার ".to_string()),
        Ok("মুখে পড়েছে।".to_string()),
    ]);
    let orchestrator = orchestrator(backend.clone());
    let use_case = open(&repository).await;

    use_case.set_input("The project has hit a snag.");
    use_case.set_format(TranslationFormat::FullTranslation);
    use_case.set_model_tier(ModelTier::Fast);
    assert_eq!(use_case.status(), TranslationStatus::Idle);

    let mut recorder = Recorder::default();
    let status = use_case.run_translation(&orchestrator, &mut recorder).await;

    assert_eq!(status, Some(TranslationStatus::Success));
    assert_eq!(
        recorder.statuses,
        vec![TranslationStatus::Streaming, TranslationStatus::Success]
    );
    assert_eq!(backend.calls(), 1);

    let output = use_case.output_text();
    assert_eq!(output, "প্রকল্পটি জটিলতার মুখে পড়েছে।");
    assert_ne!(output, use_case.input_text());
    assert!(use_case.last_error().is_none());

    let requests = backend.requests.lock().unwrap();
    assert_eq!(requests[0].profile.model, FAST_MODEL);
    assert!(requests[0].instruction.contains("MODE: FULL TRANSLATION"));
    assert!(!requests[0].instruction.contains("USER-DEFINED GLOSSARY"));
}

#[tokio::test]
async fn test_failure_keeps_partial_output() {
    let repository = Arc::new(InMemoryStateRepository::new());
    let backend = ScriptedBackend::new(vec![
        Ok("প্রকল্প".to_string()),
        Err(EditransError::translation(
            TranslationFailure::Connection,
            "connection reset",
        )),
    ]);
    let orchestrator = orchestrator(backend.clone());
    let use_case = open(&repository).await;
    use_case.set_input("The project has hit a snag.");

    let mut recorder = Recorder::default();
    let status = use_case.run_translation(&orchestrator, &mut recorder).await;

    assert_eq!(status, Some(TranslationStatus::Error));
    assert_eq!(use_case.output_text(), "প্রকল্প");
    assert_eq!(
        use_case.last_error().as_deref(),
        Some(TRANSLATION_FAILED_MESSAGE)
    );
    assert_eq!(recorder.fragments, vec!["প্রকল্প"]);
    assert_eq!(recorder.statuses.last(), Some(&TranslationStatus::Error));

    // Retry is manual and allowed from Error.
    let status = use_case.run_translation(&orchestrator, &mut ()).await;
    assert_eq!(status, Some(TranslationStatus::Error));
    assert_eq!(backend.calls(), 2);
    assert_eq!(use_case.output_text(), "প্রকল্প");
}

#[tokio::test]
async fn test_blank_input_does_not_start() {
    let repository = Arc::new(InMemoryStateRepository::new());
    let backend = ScriptedBackend::new(vec![Ok("never".to_string())]);
    let orchestrator = orchestrator(backend.clone());
    let use_case = open(&repository).await;
    use_case.set_input("   ");

    let status = use_case.run_translation(&orchestrator, &mut ()).await;

    assert_eq!(status, None);
    assert_eq!(use_case.status(), TranslationStatus::Idle);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_glossary_reaches_instruction() {
    let repository = Arc::new(InMemoryStateRepository::new());
    let backend = ScriptedBackend::new(vec![Ok("ok".to_string())]);
    let orchestrator = orchestrator(backend.clone());
    let use_case = open(&repository).await;

    use_case.add_glossary_entry("snag", "জটিলতা").unwrap();
    assert!(use_case.add_glossary_entry("  ", "x").unwrap_err().is_validation());
    use_case.set_input("The project has hit a snag.");
    use_case.run_translation(&orchestrator, &mut ()).await;

    let requests = backend.requests.lock().unwrap();
    assert!(requests[0].instruction.contains(r#"- "snag" -> "জটিলতা""#));
    assert_eq!(use_case.snapshot().glossary_len, 1);
}

#[tokio::test]
async fn test_single_flight_and_stale_fragments() {
    let repository = Arc::new(InMemoryStateRepository::new());
    let (open_gate, gate) = oneshot::channel();
    let backend = Arc::new(GatedBackend {
        gate: Mutex::new(Some(gate)),
        calls: AtomicUsize::new(0),
    });
    let orchestrator = orchestrator(backend.clone());
    let use_case = open(&repository).await;
    use_case.set_input("The project has hit a snag.");

    let mut recorder = Recorder::default();
    let run = use_case.run_translation(&orchestrator, &mut recorder);
    let interfere = async {
        while use_case.output_text().is_empty() {
            tokio::task::yield_now().await;
        }
        assert_eq!(use_case.status(), TranslationStatus::Streaming);

        // A second submit while streaming is ignored.
        let second = use_case.run_translation(&orchestrator, &mut ()).await;
        assert_eq!(second, None);
        assert_eq!(use_case.output_text(), "first ");

        use_case.clear();
        open_gate.send(()).unwrap();
    };
    let (status, ()) = tokio::join!(run, interfere);

    assert_eq!(status, Some(TranslationStatus::Idle));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert_eq!(use_case.output_text(), "");
    assert_eq!(use_case.input_text(), "");
    assert_eq!(recorder.fragments, vec!["first "]);
    assert_eq!(recorder.statuses, vec![TranslationStatus::Streaming]);
}

#[tokio::test]
async fn test_clear_keeps_glossary() {
    let repository = Arc::new(InMemoryStateRepository::new());
    let backend = ScriptedBackend::new(vec![Ok("অনুবাদ".to_string())]);
    let orchestrator = orchestrator(backend);
    let use_case = open(&repository).await;

    use_case.add_glossary_entry("regime", "সরকার").unwrap();
    use_case.set_input("text");
    use_case.run_translation(&orchestrator, &mut ()).await;
    use_case.clear();

    let snapshot = use_case.snapshot();
    assert_eq!(snapshot.status, TranslationStatus::Idle);
    assert_eq!(snapshot.input_chars, 0);
    assert_eq!(snapshot.output_chars, 0);
    assert_eq!(snapshot.glossary_len, 1);
}

#[tokio::test]
async fn test_state_survives_reopen() {
    let repository = Arc::new(InMemoryStateRepository::new());
    let backend = ScriptedBackend::new(vec![Ok("Bang".to_string()), Ok("la".to_string())]);
    let orchestrator = orchestrator(backend);

    let use_case = open(&repository).await;
    let entry = use_case.add_glossary_entry("cadre", "ক্যাডার").unwrap();
    use_case.set_input("Hello");
    use_case.run_translation(&orchestrator, &mut ()).await;
    use_case.flush().await;

    assert_eq!(repository.get(StateKey::Input).as_deref(), Some("Hello"));
    assert_eq!(repository.get(StateKey::Output).as_deref(), Some("Bangla"));
    assert_eq!(repository.get(StateKey::Outcome).as_deref(), Some("SUCCESS"));

    let reopened = open(&repository).await;
    assert_eq!(reopened.input_text(), "Hello");
    assert_eq!(reopened.output_text(), "Bangla");
    assert_eq!(reopened.status(), TranslationStatus::Success);
    assert_eq!(reopened.glossary_entries(), vec![entry]);
}
