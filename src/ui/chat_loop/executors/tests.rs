use std::io::Write;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::mpsc;

use super::ExecutorContext;
use crate::api::ChatRequest;
use crate::core::app::{apply_actions, AppAction, AppActionDispatcher, AppCommand};
use crate::core::constants::FALLBACK_REPLY;
use crate::utils::test_utils::{create_test_app, server_error, RecordedUpload, ScriptedBackend};

fn context(
    backend: Arc<ScriptedBackend>,
) -> (ExecutorContext, mpsc::UnboundedReceiver<AppAction>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        ExecutorContext::new(backend, AppActionDispatcher::new(tx)),
        rx,
    )
}

async fn run(ctx: &ExecutorContext, command: AppCommand) {
    ctx.spawn(command).await.expect("executor task panicked");
}

fn drain(rx: &mut mpsc::UnboundedReceiver<AppAction>) -> Vec<AppAction> {
    let mut actions = Vec::new();
    while let Ok(action) = rx.try_recv() {
        actions.push(action);
    }
    actions
}

#[tokio::test]
async fn send_success_reports_reply_with_request_id() {
    let backend = Arc::new(ScriptedBackend::new().with_reply(Ok("Mitochondria.")));
    let (ctx, mut rx) = context(backend.clone());

    run(
        &ctx,
        AppCommand::SendQuestion {
            request_id: 7,
            request: ChatRequest {
                question: "Powerhouse of the cell?".to_string(),
                use_user_file: true,
            },
        },
    )
    .await;

    match drain(&mut rx).as_slice() {
        [AppAction::BotReplied { request_id, text }] => {
            assert_eq!(*request_id, 7);
            assert_eq!(text, "Mitochondria.");
        }
        _ => panic!("expected a single reply"),
    }
    let questions = backend.questions.lock().expect("lock");
    assert_eq!(questions[0].question, "Powerhouse of the cell?");
    assert!(questions[0].use_user_file);
}

#[tokio::test]
async fn send_failure_reports_failure() {
    let backend = Arc::new(ScriptedBackend::new().with_reply(Err(server_error())));
    let (ctx, mut rx) = context(backend);

    run(
        &ctx,
        AppCommand::SendQuestion {
            request_id: 3,
            request: ChatRequest {
                question: "hi".to_string(),
                use_user_file: false,
            },
        },
    )
    .await;

    assert!(matches!(
        drain(&mut rx).as_slice(),
        [AppAction::BotFailed { request_id: 3 }]
    ));
}

#[tokio::test]
async fn unreadable_upload_fails_without_network_call() {
    let backend = Arc::new(ScriptedBackend::new().with_upload(Ok(())));
    let (ctx, mut rx) = context(backend.clone());
    let dir = TempDir::new().expect("temp dir");

    run(
        &ctx,
        AppCommand::UploadDocument {
            path: dir.path().join("missing.pdf"),
        },
    )
    .await;

    assert!(matches!(drain(&mut rx).as_slice(), [AppAction::UploadFailed]));
    assert_eq!(backend.upload_count(), 0);
}

#[tokio::test]
async fn upload_sends_file_bytes_and_reports_handle() {
    let backend = Arc::new(ScriptedBackend::new().with_upload(Ok(())));
    let (ctx, mut rx) = context(backend.clone());
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("chapter1.txt");
    std::fs::File::create(&path)
        .and_then(|mut file| file.write_all(b"The cell cycle"))
        .expect("write file");

    run(&ctx, AppCommand::UploadDocument { path: path.clone() }).await;

    match drain(&mut rx).as_slice() {
        [AppAction::UploadSucceeded { handle }] => {
            assert_eq!(handle.name, "chapter1.txt");
            assert_eq!(handle.size_bytes, 14);
            assert_eq!(handle.path, path);
        }
        _ => panic!("expected upload success"),
    }
    assert_eq!(
        backend.uploaded.lock().expect("lock").as_slice(),
        &[RecordedUpload {
            name: "chapter1.txt".to_string(),
            bytes: b"The cell cycle".to_vec(),
        }]
    );
}

#[tokio::test]
async fn rejected_upload_reports_failure() {
    let backend = Arc::new(ScriptedBackend::new().with_upload(Err(server_error())));
    let (ctx, mut rx) = context(backend.clone());
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# Notes").expect("write file");

    run(&ctx, AppCommand::UploadDocument { path }).await;

    assert!(matches!(drain(&mut rx).as_slice(), [AppAction::UploadFailed]));
    assert_eq!(backend.upload_count(), 1);
}

#[tokio::test]
async fn delete_reports_each_outcome() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .with_delete(Ok(()))
            .with_delete(Err(server_error())),
    );
    let (ctx, mut rx) = context(backend.clone());

    run(&ctx, AppCommand::DeleteUserData).await;
    run(&ctx, AppCommand::DeleteUserData).await;

    assert!(matches!(
        drain(&mut rx).as_slice(),
        [AppAction::DeleteSucceeded, AppAction::DeleteFailed]
    ));
    assert_eq!(backend.delete_count(), 2);
}

/// Drives actions through the state machine and the executors until no
/// more work is produced, the way the chat loop does.
async fn settle(
    app: &mut crate::core::app::App,
    ctx: &ExecutorContext,
    rx: &mut mpsc::UnboundedReceiver<AppAction>,
    actions: Vec<AppAction>,
) {
    let mut pending = actions;
    while !pending.is_empty() {
        for command in apply_actions(app, pending) {
            run(ctx, command).await;
        }
        pending = drain(rx);
    }
}

#[tokio::test]
async fn full_round_trip_success_and_failure() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .with_reply(Ok("**Osmosis** is diffusion of water."))
            .with_reply(Err(server_error())),
    );
    let (ctx, mut rx) = context(backend.clone());
    let mut app = create_test_app();

    settle(
        &mut app,
        &ctx,
        &mut rx,
        vec![AppAction::SubmitMessage {
            text: "What is osmosis?".to_string(),
        }],
    )
    .await;
    assert_eq!(app.conversation.len(), 2);
    assert!(!app.is_bot_processing());

    settle(
        &mut app,
        &ctx,
        &mut rx,
        vec![AppAction::SubmitMessage {
            text: "And again?".to_string(),
        }],
    )
    .await;
    assert_eq!(app.conversation.len(), 4);
    assert_eq!(app.conversation.messages()[3].text, FALLBACK_REPLY);
    assert_eq!(app.conversation.history().len(), 2);
    assert!(!app.is_bot_processing());
    assert_eq!(backend.question_count(), 2);
}

#[tokio::test]
async fn delete_without_document_never_reaches_backend() {
    let backend = Arc::new(ScriptedBackend::new().with_delete(Ok(())));
    let (ctx, mut rx) = context(backend.clone());
    let mut app = create_test_app();

    settle(&mut app, &ctx, &mut rx, vec![AppAction::DeleteDocument]).await;

    assert_eq!(backend.delete_count(), 0);
    assert!(app.document.is_none());
    assert!(!app.is_deleting);
}

#[tokio::test]
async fn upload_then_delete_round_trip() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .with_upload(Ok(()))
            .with_delete(Ok(())),
    );
    let (ctx, mut rx) = context(backend.clone());
    let mut app = create_test_app();
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("essay.docx");
    std::fs::write(&path, "draft").expect("write file");

    settle(
        &mut app,
        &ctx,
        &mut rx,
        vec![AppAction::UploadDocument {
            path: path.display().to_string(),
        }],
    )
    .await;
    assert_eq!(
        app.document.as_ref().map(|doc| doc.name.as_str()),
        Some("essay.docx")
    );

    settle(&mut app, &ctx, &mut rx, vec![AppAction::DeleteDocument]).await;
    assert!(app.document.is_none());
    assert!(!app.is_deleting);
    assert_eq!(backend.delete_count(), 1);
}
