//! Storefront controller: owns the catalog handle, the current view, and the
//! single-slot gate that serializes image generation triggers.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use catalog::{seed::HERO_PROMPT, CatalogStore};
use shared::domain::{DataUri, ProductId, View};
use tokio::sync::{broadcast, RwLock, Semaphore, SemaphorePermit};
use tracing::{info, warn};

use crate::{
    error::{GenerationError, GenerationErrorKind},
    generator::ImageGenerator,
};

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GenerationTarget {
    Hero,
    Product(ProductId),
}

impl fmt::Display for GenerationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hero => f.write_str("hero"),
            Self::Product(id) => write!(f, "product {id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Generated,
    NoImage,
    AlreadyPresent,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<(GenerationTarget, ItemOutcome)>,
}

impl BatchReport {
    fn record(&mut self, target: GenerationTarget, outcome: ItemOutcome) {
        self.outcomes.push((target, outcome));
    }

    pub fn generated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == ItemOutcome::Generated)
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&GenerationTarget, &str)> {
        self.outcomes.iter().filter_map(|(target, outcome)| match outcome {
            ItemOutcome::Failed(reason) => Some((target, reason.as_str())),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorefrontEvent {
    BusyChanged(bool),
    Alert {
        kind: GenerationErrorKind,
        message: String,
    },
    ItemGenerated { target: GenerationTarget },
    ItemSkipped { target: GenerationTarget },
    ItemFailed { target: GenerationTarget, reason: String },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FlowOptions {
    /// Request a new hero image even when one is already set.
    pub regenerate_hero: bool,
}

pub struct Storefront {
    catalog: CatalogStore,
    generator: Arc<dyn ImageGenerator>,
    options: FlowOptions,
    gate: Semaphore,
    busy: AtomicBool,
    view: RwLock<View>,
    events: broadcast::Sender<StorefrontEvent>,
}

/// Holds the generation permit; clears the busy flag on every exit path.
struct BusyGuard<'a> {
    busy: &'a AtomicBool,
    events: &'a broadcast::Sender<StorefrontEvent>,
    _permit: SemaphorePermit<'a>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
        let _ = self.events.send(StorefrontEvent::BusyChanged(false));
    }
}

impl Storefront {
    pub fn new(
        catalog: CatalogStore,
        generator: Arc<dyn ImageGenerator>,
        options: FlowOptions,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            catalog,
            generator,
            options,
            gate: Semaphore::new(1),
            busy: AtomicBool::new(false),
            view: RwLock::new(View::Home),
            events,
        })
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.events.subscribe()
    }

    pub async fn current_view(&self) -> View {
        self.view.read().await.clone()
    }

    /// Switches to `raw` ("home" or a product id); unknown ids land on home.
    pub async fn navigate(&self, raw: &str) -> View {
        let products = self.catalog.all_products().await;
        let next = View::resolve(raw, &products);
        *self.view.write().await = next.clone();
        next
    }

    /// Hero first, then every product still lacking an image, one request at
    /// a time in catalog order. A failing item is logged and skipped; the
    /// successful product images are committed together at the end.
    pub async fn generate_all(&self) -> Result<BatchReport, GenerationError> {
        let _guard = self.begin()?;
        info!("batch image generation started");

        let mut report = BatchReport::default();

        if self.hero_needs_generation().await {
            let outcome = match self.generator.generate_image(HERO_PROMPT).await {
                Ok(Some(image)) => {
                    self.catalog.set_hero_image(image).await;
                    ItemOutcome::Generated
                }
                Ok(None) => ItemOutcome::NoImage,
                Err(err) => {
                    warn!(error = %err, "hero image generation failed; continuing");
                    ItemOutcome::Failed(err.to_string())
                }
            };
            self.announce(&GenerationTarget::Hero, &outcome);
            report.record(GenerationTarget::Hero, outcome);
        } else {
            report.record(GenerationTarget::Hero, ItemOutcome::AlreadyPresent);
        }

        let mut generated = Vec::new();
        for product in self.catalog.all_products().await {
            let target = GenerationTarget::Product(product.id.clone());
            if product.has_generated_image() {
                report.record(target, ItemOutcome::AlreadyPresent);
                continue;
            }

            let outcome = match self.generator.generate_image(&product.image_prompt).await {
                Ok(Some(image)) => {
                    generated.push((product.id.clone(), image));
                    ItemOutcome::Generated
                }
                Ok(None) => ItemOutcome::NoImage,
                Err(err) => {
                    warn!(product_id = %product.id, error = %err, "product image generation failed; continuing");
                    ItemOutcome::Failed(err.to_string())
                }
            };
            self.announce(&target, &outcome);
            report.record(target, outcome);
        }

        self.catalog.apply_generated_images(generated).await;
        info!(
            generated = report.generated_count(),
            failed = report.failures().count(),
            "batch image generation finished"
        );
        Ok(report)
    }

    /// Per-item trigger for the hero banner. Failures abort and raise an alert.
    pub async fn generate_hero(&self) -> Result<ItemOutcome, GenerationError> {
        self.ensure_credential()?;
        if !self.hero_needs_generation().await {
            return Ok(ItemOutcome::AlreadyPresent);
        }

        let _guard = self.begin()?;
        // the slot can be filled between the first check and taking the permit
        if !self.hero_needs_generation().await {
            return Ok(ItemOutcome::AlreadyPresent);
        }
        let image = self.request(&GenerationTarget::Hero, HERO_PROMPT).await?;
        let outcome = match image {
            Some(image) => {
                self.catalog.set_hero_image(image).await;
                ItemOutcome::Generated
            }
            None => ItemOutcome::NoImage,
        };
        self.announce(&GenerationTarget::Hero, &outcome);
        Ok(outcome)
    }

    /// Per-item trigger for one product; a later result replaces an earlier one.
    pub async fn generate_product(
        &self,
        product_id: &ProductId,
    ) -> Result<ItemOutcome, GenerationError> {
        let Some(product) = self.catalog.product(product_id).await else {
            let err = GenerationError::UnknownProduct(product_id.clone());
            self.alert(&err);
            return Err(err);
        };

        let _guard = self.begin()?;
        let target = GenerationTarget::Product(product.id.clone());
        let outcome = match self.request(&target, &product.image_prompt).await? {
            Some(image) => {
                self.catalog.set_generated_image(&product.id, image).await;
                ItemOutcome::Generated
            }
            None => ItemOutcome::NoImage,
        };
        self.announce(&target, &outcome);
        Ok(outcome)
    }

    async fn request(
        &self,
        target: &GenerationTarget,
        prompt: &str,
    ) -> Result<Option<DataUri>, GenerationError> {
        info!(%target, "image generation started");
        self.generator.generate_image(prompt).await.map_err(|err| {
            warn!(%target, error = %err, "image generation failed");
            self.announce(target, &ItemOutcome::Failed(err.to_string()));
            self.alert(&err);
            err
        })
    }

    async fn hero_needs_generation(&self) -> bool {
        self.options.regenerate_hero || self.catalog.hero_image().await.is_none()
    }

    fn ensure_credential(&self) -> Result<(), GenerationError> {
        if self.generator.has_credential() {
            return Ok(());
        }
        let err = GenerationError::MissingCredential;
        self.alert(&err);
        Err(err)
    }

    fn begin(&self) -> Result<BusyGuard<'_>, GenerationError> {
        self.ensure_credential()?;
        let permit = self.gate.try_acquire().map_err(|_| {
            let err = GenerationError::Busy;
            self.alert(&err);
            err
        })?;

        self.busy.store(true, Ordering::SeqCst);
        let _ = self.events.send(StorefrontEvent::BusyChanged(true));
        Ok(BusyGuard {
            busy: &self.busy,
            events: &self.events,
            _permit: permit,
        })
    }

    fn alert(&self, err: &GenerationError) {
        let _ = self.events.send(StorefrontEvent::Alert {
            kind: err.kind(),
            message: err.to_string(),
        });
    }

    fn announce(&self, target: &GenerationTarget, outcome: &ItemOutcome) {
        let target = target.clone();
        let event = match outcome {
            ItemOutcome::Generated => StorefrontEvent::ItemGenerated { target },
            ItemOutcome::NoImage | ItemOutcome::AlreadyPresent => {
                StorefrontEvent::ItemSkipped { target }
            }
            ItemOutcome::Failed(reason) => StorefrontEvent::ItemFailed {
                target,
                reason: reason.clone(),
            },
        };
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/storefront_tests.rs"]
mod tests;
