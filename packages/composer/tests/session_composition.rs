//! Integration tests for session composition

use inkstone_composer::{
    placeholder_text, ComposerError, HistoryMode, HostEnv, Mutation, NodePath, ProviderFactory,
    ProviderHandle, ResizeSignal, Session, SessionConfig, SharedHistoryState,
    COMMUNITY_INVITE_URL,
};
use inkstone_engine::ErrorHandler;
use inkstone_model::{BlockNode, ListKind, NodeKind};
use std::sync::{Arc, Mutex};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Browser-like host with a layout capability and a frame identity.
struct BrowserHost {
    width: u32,
    secondary_frame: bool,
}

impl HostEnv for BrowserHost {
    fn is_secondary_embedded_instance(&self) -> bool {
        self.secondary_frame
    }

    fn viewport_width(&self) -> Option<u32> {
        Some(self.width)
    }
}

fn primary_host() -> BrowserHost {
    BrowserHost {
        width: 1280,
        secondary_frame: false,
    }
}

/// Provider stub that records its lifecycle calls.
struct RecordingProvider {
    session_id: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl ProviderHandle for RecordingProvider {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn connect(&mut self, should_bootstrap: bool) {
        self.log
            .lock()
            .unwrap()
            .push(format!("connect:{should_bootstrap}"));
    }

    fn broadcast(&mut self, _update: &[u8]) {
        self.log.lock().unwrap().push("broadcast".to_string());
    }

    fn disconnect(&mut self) {
        self.log.lock().unwrap().push("disconnect".to_string());
    }
}

#[derive(Clone, Default)]
struct StubProviderFactory {
    log: Arc<Mutex<Vec<String>>>,
}

impl StubProviderFactory {
    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl ProviderFactory for StubProviderFactory {
    fn create(&self, session_id: &str) -> Box<dyn ProviderHandle> {
        self.log
            .lock()
            .unwrap()
            .push(format!("create:{session_id}"));
        Box::new(RecordingProvider {
            session_id: session_id.to_string(),
            log: self.log.clone(),
        })
    }
}

fn capturing_handler() -> (ErrorHandler, Arc<Mutex<Vec<String>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();
    let handler: ErrorHandler = Arc::new(move |err| {
        sink.lock().unwrap().push(err.to_string());
    });
    (handler, captured)
}

fn start(
    config: &SessionConfig,
    host: &BrowserHost,
    signal: &ResizeSignal,
    history: &SharedHistoryState,
    factory: &StubProviderFactory,
) -> Session {
    Session::start(config, host, signal, history, factory).unwrap()
}

#[test]
fn test_local_session_builds_welcome_document() {
    init_tracing();
    let (handler, errors) = capturing_handler();
    let config = SessionConfig::new("Inkstone", handler);
    let session = start(
        &config,
        &primary_host(),
        &ResizeSignal::new(),
        &SharedHistoryState::new(),
        &StubProviderFactory::default(),
    );

    let document = session.engine().document();
    let kinds: Vec<NodeKind> = document.children.iter().map(|b| b.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Heading,
            NodeKind::Quote,
            NodeKind::Paragraph,
            NodeKind::Paragraph,
            NodeKind::List,
            NodeKind::Paragraph,
        ]
    );

    match &document.children[4] {
        BlockNode::List { kind, items } => {
            assert_eq!(*kind, ListKind::Bullet);
            assert_eq!(items.len(), 4);
            assert_eq!(
                document.resolve_link_url(&[4, 3, 1]).map(String::as_str),
                Some(COMMUNITY_INVITE_URL)
            );
        }
        other => panic!("expected list, got {:?}", other.kind()),
    }

    assert!(errors.lock().unwrap().is_empty());
}

#[test]
fn test_exactly_one_history_branch_for_every_configuration() {
    init_tracing();
    for collaboration in [false, true] {
        for rich_text in [false, true] {
            for start_empty in [false, true] {
                let (handler, _) = capturing_handler();
                let config = SessionConfig::new("Inkstone", handler)
                    .with_collaboration(collaboration)
                    .with_rich_text(rich_text)
                    .with_start_empty(start_empty);

                let factory = StubProviderFactory::default();
                let session = start(
                    &config,
                    &primary_host(),
                    &ResizeSignal::new(),
                    &SharedHistoryState::new(),
                    &factory,
                );

                let mode = session.history_mode();
                assert_ne!(
                    mode.is_local(),
                    mode.is_collaborative(),
                    "exactly one branch must be mounted \
                     (collab={collaboration}, rich={rich_text}, empty={start_empty})"
                );
                assert_eq!(mode.is_collaborative(), collaboration);

                if collaboration {
                    assert_eq!(factory.calls()[0], "create:main");
                } else {
                    assert!(factory.calls().is_empty());
                }
            }
        }
    }
}

#[test]
fn test_collaboration_never_runs_the_builder() {
    init_tracing();
    for start_empty in [false, true] {
        let (handler, _) = capturing_handler();
        let config = SessionConfig::new("Inkstone", handler)
            .with_collaboration(true)
            .with_start_empty(start_empty);

        let session = start(
            &config,
            &primary_host(),
            &ResizeSignal::new(),
            &SharedHistoryState::new(),
            &StubProviderFactory::default(),
        );

        // The provider is the document authority; the local builder must
        // leave no trace regardless of start_empty.
        assert!(session.engine().document().is_empty());
    }
}

#[test]
fn test_bootstrap_suppressed_in_secondary_embedded_frame() {
    init_tracing();
    let (handler, _) = capturing_handler();
    let config = SessionConfig::new("Inkstone", handler).with_collaboration(true);

    let factory = StubProviderFactory::default();
    let secondary = BrowserHost {
        width: 1280,
        secondary_frame: true,
    };
    let _session = start(
        &config,
        &secondary,
        &ResizeSignal::new(),
        &SharedHistoryState::new(),
        &factory,
    );
    assert_eq!(factory.calls(), vec!["create:main", "connect:false"]);

    let factory = StubProviderFactory::default();
    let _session = start(
        &config,
        &primary_host(),
        &ResizeSignal::new(),
        &SharedHistoryState::new(),
        &factory,
    );
    assert_eq!(factory.calls(), vec!["create:main", "connect:true"]);
}

#[test]
fn test_teardown_disconnects_provider_and_releases_listener() {
    init_tracing();
    let (handler, _) = capturing_handler();
    let config = SessionConfig::new("Inkstone", handler).with_collaboration(true);

    let factory = StubProviderFactory::default();
    let signal = ResizeSignal::new();
    let session = start(
        &config,
        &primary_host(),
        &signal,
        &SharedHistoryState::new(),
        &factory,
    );
    assert_eq!(signal.listener_count(), 1);

    drop(session);

    assert_eq!(signal.listener_count(), 0);
    assert_eq!(factory.calls().last().map(String::as_str), Some("disconnect"));
}

#[test]
fn test_configuration_error_reaches_handler_once_then_propagates() {
    init_tracing();
    let (handler, captured) = capturing_handler();
    // Empty namespace is rejected by the engine
    let config = SessionConfig::new("", handler);

    let result = Session::start(
        &config,
        &primary_host(),
        &ResizeSignal::new(),
        &SharedHistoryState::new(),
        &StubProviderFactory::default(),
    );

    let err = result.err().expect("configuration must fail");
    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1, "handler observes the error exactly once");
    // The propagated error is the same one the handler observed
    assert!(err.to_string().contains(captured[0].as_str()));
}

#[test]
fn test_viewport_transitions_only_on_breakpoint_crossing() {
    init_tracing();
    let (handler, _) = capturing_handler();
    let config = SessionConfig::new("Inkstone", handler);

    let signal = ResizeSignal::new();
    let host = BrowserHost {
        width: 1200,
        secondary_frame: false,
    };
    let session = start(
        &config,
        &host,
        &signal,
        &SharedHistoryState::new(),
        &StubProviderFactory::default(),
    );

    assert!(!session.viewport().is_narrow());

    for width in [1200, 1100, 1000, 900] {
        signal.emit(width);
    }

    assert_eq!(session.viewport().transition_count(), 1);
    assert!(session.viewport().is_narrow());
}

#[test]
fn test_placeholder_selection_matches_session_modes() {
    let (handler, _) = capturing_handler();
    let base = SessionConfig::new("Inkstone", handler);

    assert_eq!(
        placeholder_text(&base.clone().with_collaboration(true)),
        "Enter some collaborative rich text..."
    );
    assert_eq!(placeholder_text(&base), "Enter some rich text...");
}

#[test]
fn test_local_history_survives_remount() -> anyhow::Result<()> {
    init_tracing();
    let (handler, _) = capturing_handler();
    let config = SessionConfig::new("Inkstone", handler);

    let history = SharedHistoryState::new();
    let signal = ResizeSignal::new();
    let factory = StubProviderFactory::default();

    let mut session = start(&config, &primary_host(), &signal, &history, &factory);
    session.apply(Mutation::UpdateText {
        path: NodePath(vec![0, 0]),
        content: "Hello again".to_string(),
    })?;
    assert_eq!(
        session.engine().document().resolve_text(&[0, 0]).unwrap().content,
        "Hello again"
    );
    assert_eq!(history.undo_levels(), 1);

    // Remount: the session goes away, the externally owned history does not
    drop(session);
    assert_eq!(history.undo_levels(), 1);

    let mut session = start(&config, &primary_host(), &signal, &history, &factory);
    let undone = session.undo()?;
    assert!(undone);
    assert_eq!(
        session.engine().document().resolve_text(&[0, 0]).unwrap().content,
        "Welcome to Inkstone"
    );
    Ok(())
}

#[cfg(feature = "collaboration")]
#[test]
fn test_bootstrapping_participant_seeds_shared_baseline() {
    use inkstone_composer::CollabDocument;
    use inkstone_model::{DocumentRoot, InlineNode};

    // The bootstrapping participant starts from the expected empty baseline
    let mut seeder = CollabDocument::new();
    assert!(seeder.to_root().unwrap().is_empty());

    let mut root = DocumentRoot::new();
    root.append(BlockNode::paragraph(vec![InlineNode::text("shared")]));
    seeder.set_root(&root).unwrap();

    // A joining participant converges without running any local builder
    let mut joiner = CollabDocument::new();
    joiner.apply_update(&seeder.encode_update()).unwrap();
    assert_eq!(joiner.to_root().unwrap(), root);
}

#[test]
fn test_collaborative_session_delegates_history() {
    init_tracing();
    let (handler, _) = capturing_handler();
    let config = SessionConfig::new("Inkstone", handler)
        .with_collaboration(true)
        .with_start_empty(false);

    let factory = StubProviderFactory::default();
    let mut session = start(
        &config,
        &primary_host(),
        &ResizeSignal::new(),
        &SharedHistoryState::new(),
        &factory,
    );

    // Seed a block as if it arrived from the provider, then mutate locally
    session
        .apply(Mutation::InsertBlock {
            index: 0,
            block: BlockNode::paragraph(vec![inkstone_model::InlineNode::text("shared")]),
        })
        .unwrap();
    assert!(factory.calls().contains(&"broadcast".to_string()));

    assert!(matches!(
        session.undo(),
        Err(ComposerError::HistoryDelegated)
    ));
    assert!(matches!(
        session.history_mode(),
        HistoryMode::Collaborative {
            should_bootstrap: true,
            ..
        }
    ));
}
