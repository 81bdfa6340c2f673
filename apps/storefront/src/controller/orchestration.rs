//! Command orchestration from CLI/browse actions to the storefront controller.

use std::sync::Arc;

use catalog::CatalogEvent;
use client_core::{BatchReport, GenerationError, ItemOutcome, Storefront, StorefrontEvent};
use shared::domain::{ProductId, View};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};

use crate::{
    controller::events::{describe_catalog_event, describe_event, UiError, UiErrorContext},
    ui::render::render_view,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    All,
    Hero,
    Product(ProductId),
}

impl Trigger {
    pub fn context(&self) -> UiErrorContext {
        match self {
            Self::All => UiErrorContext::Batch,
            Self::Hero => UiErrorContext::HeroVisual,
            Self::Product(_) => UiErrorContext::ProductVisual,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Batch(BatchReport),
    Item(ItemOutcome),
}

pub async fn run_trigger(
    storefront: &Storefront,
    trigger: &Trigger,
) -> Result<TriggerOutcome, UiError> {
    let result = match trigger {
        Trigger::All => storefront.generate_all().await.map(TriggerOutcome::Batch),
        Trigger::Hero => storefront.generate_hero().await.map(TriggerOutcome::Item),
        Trigger::Product(id) => storefront
            .generate_product(id)
            .await
            .map(TriggerOutcome::Item),
    };
    result.map_err(|err: GenerationError| UiError::from_generation_error(trigger.context(), &err))
}

/// Process exit status for a failed trigger: 2 when it never reached the
/// image service, 1 otherwise.
pub fn failure_exit_status(err: &UiError) -> u8 {
    if err.kind().is_precondition() {
        2
    } else {
        1
    }
}

pub async fn render_current(storefront: &Storefront) -> String {
    let view = storefront.current_view().await;
    let products = storefront.catalog().all_products().await;
    let hero = storefront.catalog().hero_image().await;
    render_view(&view, &products, hero.as_ref(), storefront.is_busy())
}

/// Prints storefront and catalog events to stderr until the controller is dropped.
pub fn spawn_event_reporter(storefront: &Storefront, context: UiErrorContext) -> JoinHandle<()> {
    let events = storefront.subscribe_events();
    let catalog = storefront.catalog().subscribe();
    tokio::spawn(report_events(events, catalog, context, |line| {
        eprintln!("{line}")
    }))
}

pub async fn report_events(
    mut events: broadcast::Receiver<StorefrontEvent>,
    mut catalog: broadcast::Receiver<CatalogEvent>,
    context: UiErrorContext,
    mut emit: impl FnMut(String),
) {
    let mut catalog_open = true;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if let Some(line) = describe_event(&event, context) {
                        emit(line);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event reporter lagged");
                }
                Err(RecvError::Closed) => break,
            },
            change = catalog.recv(), if catalog_open => match change {
                Ok(change) => emit(describe_catalog_event(&change)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "catalog reporter lagged");
                }
                Err(RecvError::Closed) => catalog_open = false,
            },
        }
    }
    // the controller is gone; flush catalog changes still queued
    while let Ok(change) = catalog.try_recv() {
        emit(describe_catalog_event(&change));
    }
}

/// Drops the controller, waits for the reporter to flush, then yields `result`.
pub async fn finish_session<T>(
    storefront: Arc<Storefront>,
    reporter: JoinHandle<()>,
    result: anyhow::Result<T>,
) -> anyhow::Result<T> {
    drop(storefront);
    if let Err(err) = reporter.await {
        tracing::warn!(error = %err, "event reporter task failed");
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Navigate(String),
    Generate(Trigger),
    GenerateCurrent,
    Help,
    Quit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let head = words.next()?.to_ascii_lowercase();
        let arg = words.next();
        let command = match (head.as_str(), arg) {
            ("quit" | "exit" | "q", _) => Self::Quit,
            ("help" | "?", _) => Self::Help,
            ("generate" | "g", None) => Self::GenerateCurrent,
            ("generate" | "g", Some("all")) => Self::Generate(Trigger::All),
            ("generate" | "g", Some("hero")) => Self::Generate(Trigger::Hero),
            ("generate" | "g", Some(id)) => Self::Generate(Trigger::Product(ProductId::new(id))),
            ("open" | "view", Some(target)) => Self::Navigate(target.to_string()),
            (target, None) => Self::Navigate(target.to_string()),
            _ => return None,
        };
        Some(command)
    }
}

pub const BROWSE_HELP: &str = "commands: home | <product id> | generate [all|hero|<id>] | help | quit";

/// Trigger implied by `generate` with no argument on the current view.
pub fn trigger_for_view(view: &View) -> Trigger {
    match view {
        View::Home => Trigger::Hero,
        View::Product(id) => Trigger::Product(id.clone()),
    }
}

/// Applies one browse command; returns `false` when the session should end.
pub async fn apply_browse_command(
    storefront: &Arc<Storefront>,
    command: BrowseCommand,
) -> (bool, Option<String>) {
    match command {
        BrowseCommand::Quit => (false, None),
        BrowseCommand::Help => (true, Some(BROWSE_HELP.to_string())),
        BrowseCommand::Navigate(target) => {
            storefront.navigate(&target).await;
            (true, Some(render_current(storefront).await))
        }
        BrowseCommand::GenerateCurrent => {
            let trigger = trigger_for_view(&storefront.current_view().await);
            // failures reach the shopper through the event reporter's alert line
            let _ = run_trigger(storefront, &trigger).await;
            (true, Some(render_current(storefront).await))
        }
        BrowseCommand::Generate(trigger) => {
            let _ = run_trigger(storefront, &trigger).await;
            (true, Some(render_current(storefront).await))
        }
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
