use super::*;

use async_trait::async_trait;
use catalog::CatalogStore;
use client_core::{FlowOptions, ImageGenerator};
use shared::domain::DataUri;
use tokio::sync::mpsc;

use crate::controller::events::UiErrorCategory;

struct FixedGenerator {
    credential: bool,
    rejection: Option<(u16, &'static str)>,
}

#[async_trait]
impl ImageGenerator for FixedGenerator {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Option<DataUri>, GenerationError> {
        match self.rejection {
            Some((status, message)) => Err(GenerationError::Rejected {
                status,
                message: message.to_string(),
            }),
            None => Ok(Some(DataUri::new("image/png", "AAAA"))),
        }
    }
}

fn storefront_with(generator: FixedGenerator) -> Arc<Storefront> {
    Storefront::new(
        CatalogStore::seeded(),
        Arc::new(generator),
        FlowOptions::default(),
    )
}

fn storefront(credential: bool) -> Arc<Storefront> {
    storefront_with(FixedGenerator {
        credential,
        rejection: None,
    })
}

fn collecting_reporter(
    storefront: &Storefront,
    context: UiErrorContext,
) -> (JoinHandle<()>, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(report_events(
        storefront.subscribe_events(),
        storefront.catalog().subscribe(),
        context,
        move |line| {
            let _ = tx.send(line);
        },
    ));
    (reporter, rx)
}

fn collected(mut rx: mpsc::UnboundedReceiver<String>) -> Vec<String> {
    let mut lines = Vec::new();
    while let Ok(line) = rx.try_recv() {
        lines.push(line);
    }
    lines
}

#[test]
fn parses_browse_commands() {
    assert_eq!(
        BrowseCommand::parse("p2"),
        Some(BrowseCommand::Navigate("p2".into()))
    );
    assert_eq!(
        BrowseCommand::parse("open home"),
        Some(BrowseCommand::Navigate("home".into()))
    );
    assert_eq!(
        BrowseCommand::parse("generate"),
        Some(BrowseCommand::GenerateCurrent)
    );
    assert_eq!(
        BrowseCommand::parse("g all"),
        Some(BrowseCommand::Generate(Trigger::All))
    );
    assert_eq!(
        BrowseCommand::parse("generate hero"),
        Some(BrowseCommand::Generate(Trigger::Hero))
    );
    assert_eq!(
        BrowseCommand::parse("generate p3"),
        Some(BrowseCommand::Generate(Trigger::Product(ProductId::new("p3"))))
    );
    assert_eq!(BrowseCommand::parse("QUIT"), Some(BrowseCommand::Quit));
    assert_eq!(BrowseCommand::parse("   "), None);
    assert_eq!(BrowseCommand::parse("what is this"), None);
}

#[test]
fn bare_generate_follows_current_view() {
    assert_eq!(trigger_for_view(&View::Home), Trigger::Hero);
    assert_eq!(
        trigger_for_view(&View::Product(ProductId::new("p1"))),
        Trigger::Product(ProductId::new("p1"))
    );
}

#[tokio::test]
async fn missing_credential_becomes_config_alert() {
    let storefront = storefront(false);

    let err = run_trigger(&storefront, &Trigger::All)
        .await
        .expect_err("should fail");

    assert_eq!(err.category(), UiErrorCategory::Config);
    assert_eq!(err.context(), UiErrorContext::Batch);
    assert_eq!(failure_exit_status(&err), 2);
    assert!(storefront.catalog().hero_image().await.is_none());
}

#[tokio::test]
async fn server_rejection_is_classified_from_its_status() {
    let storefront = storefront_with(FixedGenerator {
        credential: true,
        rejection: Some((500, "Invalid JSON payload received.")),
    });

    let err = run_trigger(&storefront, &Trigger::Hero)
        .await
        .expect_err("should fail");

    assert_eq!(err.category(), UiErrorCategory::Transport);
    assert_eq!(err.context(), UiErrorContext::HeroVisual);
    assert_eq!(failure_exit_status(&err), 1);
}

#[tokio::test]
async fn reporter_prints_catalog_changes_from_a_batch() {
    let storefront = storefront(true);
    let (reporter, rx) = collecting_reporter(&storefront, UiErrorContext::Batch);

    run_trigger(&storefront, &Trigger::All).await.expect("batch");
    finish_session(storefront, reporter, Ok(()))
        .await
        .expect("session");

    let lines = collected(rx);
    assert!(lines.contains(&"catalog: hero banner updated".to_string()));
    assert!(lines.contains(&"catalog: 4 product visual(s) stored [p1, p2, p3, p4]".to_string()));
    assert!(lines.iter().any(|line| line == "Generating..."));
}

#[tokio::test]
async fn failed_session_still_flushes_the_reporter() {
    let storefront = storefront(false);
    let (reporter, rx) = collecting_reporter(&storefront, UiErrorContext::Batch);

    let _ = run_trigger(&storefront, &Trigger::All).await;
    let err = finish_session::<()>(
        storefront,
        reporter,
        Err(anyhow::anyhow!("failed to create export directory")),
    )
    .await
    .expect_err("export error is returned");

    assert!(err.to_string().contains("export directory"));
    assert!(collected(rx)
        .iter()
        .any(|line| line.starts_with("!! Catalog visuals: set API_KEY")));
}

#[tokio::test]
async fn batch_trigger_reports_every_item() {
    let storefront = storefront(true);

    let outcome = run_trigger(&storefront, &Trigger::All).await.expect("batch");

    match outcome {
        TriggerOutcome::Batch(report) => assert_eq!(report.generated_count(), 5),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn browse_session_navigates_and_generates_current_product() {
    let storefront = storefront(true);

    let (keep_going, screen) =
        apply_browse_command(&storefront, BrowseCommand::Navigate("p4".into())).await;
    assert!(keep_going);
    let screen = screen.expect("screen");
    assert!(screen.contains("Zephyr Tower"));
    assert!(screen.contains("Generate Product Visual"));

    let (_, screen) = apply_browse_command(&storefront, BrowseCommand::GenerateCurrent).await;
    let screen = screen.expect("screen");
    assert!(screen.contains("image image/png"));
    assert!(!screen.contains("Generate Product Visual"));

    let (_, screen) =
        apply_browse_command(&storefront, BrowseCommand::Navigate("home".into())).await;
    assert!(screen.expect("screen").contains("Pro. Beyond."));

    let (keep_going, screen) = apply_browse_command(&storefront, BrowseCommand::Quit).await;
    assert!(!keep_going);
    assert!(screen.is_none());
}
