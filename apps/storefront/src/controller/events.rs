//! Storefront events rendered as status lines and blocking alerts.

use catalog::CatalogEvent;
use client_core::{GenerationError, GenerationErrorKind, StorefrontEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Config,
    Auth,
    Busy,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    HeroVisual,
    ProductVisual,
    Batch,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    kind: GenerationErrorKind,
    message: String,
}

impl UiError {
    pub fn from_generation_error(context: UiErrorContext, err: &GenerationError) -> Self {
        Self::from_kind(context, err.kind(), err.to_string())
    }

    pub fn from_kind(
        context: UiErrorContext,
        kind: GenerationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        let category = match kind {
            GenerationErrorKind::MissingCredential | GenerationErrorKind::InvalidEndpoint => {
                UiErrorCategory::Config
            }
            GenerationErrorKind::Busy => UiErrorCategory::Busy,
            GenerationErrorKind::Transport => UiErrorCategory::Transport,
            GenerationErrorKind::Rejected { status: 401 | 403 } => UiErrorCategory::Auth,
            GenerationErrorKind::Rejected {
                status: 408 | 429 | 500..=599,
            } => UiErrorCategory::Transport,
            GenerationErrorKind::Rejected { status: 400..=499 }
            | GenerationErrorKind::UnknownProduct
            | GenerationErrorKind::MalformedResponse => UiErrorCategory::Validation,
            GenerationErrorKind::Rejected { .. } => UiErrorCategory::Unknown,
        };

        Self {
            category,
            context,
            kind,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn kind(&self) -> GenerationErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The text of the blocking notification shown to the shopper.
    pub fn alert_text(&self) -> String {
        let hint = match self.category {
            UiErrorCategory::Config => "set API_KEY (or APP__API_KEY) and retry",
            UiErrorCategory::Auth => "the image service rejected the API key",
            UiErrorCategory::Busy => "wait for the current generation to finish",
            UiErrorCategory::Transport => "image service unreachable; check network and retry",
            UiErrorCategory::Validation => "request could not be completed",
            UiErrorCategory::Unknown => "image generation failed",
        };
        let subject = match self.context {
            UiErrorContext::HeroVisual => "Hero visual",
            UiErrorContext::ProductVisual => "Product visual",
            UiErrorContext::Batch => "Catalog visuals",
            UiErrorContext::General => "Storefront",
        };
        format!("{subject}: {hint} ({})", self.message)
    }
}

/// Status line for a storefront event, `None` for events that need no output.
pub fn describe_event(event: &StorefrontEvent, context: UiErrorContext) -> Option<String> {
    match event {
        StorefrontEvent::BusyChanged(true) => Some("Generating...".to_string()),
        StorefrontEvent::BusyChanged(false) => None,
        StorefrontEvent::Alert { kind, message } => Some(format!(
            "!! {}",
            UiError::from_kind(context, *kind, message.clone()).alert_text()
        )),
        StorefrontEvent::ItemGenerated { target } => Some(format!("✦ {target}: visual ready")),
        StorefrontEvent::ItemSkipped { target } => {
            Some(format!("{target}: no new visual produced"))
        }
        StorefrontEvent::ItemFailed { target, reason } => {
            Some(format!("{target}: skipped after failure ({reason})"))
        }
    }
}

/// Status line for a catalog change.
pub fn describe_catalog_event(event: &CatalogEvent) -> String {
    match event {
        CatalogEvent::HeroImageChanged => "catalog: hero banner updated".to_string(),
        CatalogEvent::ProductsChanged { ids } => {
            let ids = ids.iter().map(|id| id.as_str()).collect::<Vec<_>>();
            format!(
                "catalog: {} product visual(s) stored [{}]",
                ids.len(),
                ids.join(", ")
            )
        }
    }
}

#[cfg(test)]
#[path = "../tests/events_tests.rs"]
mod tests;
