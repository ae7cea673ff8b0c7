use crate::common_types::LanguageCode;
use crate::pipeline::PageErrorPolicy;
use crate::plugins::OcrPlugin;
use crate::recognition::{PageGeometry, PageImage, RecognitionResult};
use crate::AppResult;
use futures::{StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    Recognized(RecognitionResult),
    Failed { page: PageGeometry, error: String },
}

impl PageOutcome {
    pub fn page(&self) -> &PageGeometry {
        match self {
            PageOutcome::Recognized(result) => &result.page,
            PageOutcome::Failed { page, .. } => page,
        }
    }

    pub fn result(&self) -> Option<&RecognitionResult> {
        match self {
            PageOutcome::Recognized(result) => Some(result),
            PageOutcome::Failed { .. } => None,
        }
    }
}

/// Dispatches page jobs to a plugin with at most `jobs` of them in flight.
/// Outcomes come back in page order regardless of completion order.
#[derive(Debug)]
pub struct PageScheduler {
    jobs: usize,
    detect_orientation: bool,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl PageScheduler {
    pub fn new(jobs: usize) -> Self {
        Self {
            jobs: jobs.max(1),
            detect_orientation: false,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn with_orientation(self, detect_orientation: bool) -> Self {
        Self {
            detect_orientation,
            ..self
        }
    }

    pub fn peak_jobs(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub async fn recognize_pages<'p, P, I>(
        &self,
        plugin: &P,
        pages: I,
        language: &LanguageCode,
        policy: PageErrorPolicy,
        bar: &ProgressBar,
    ) -> AppResult<Vec<PageOutcome>>
    where
        P: OcrPlugin,
        I: IntoIterator<Item = &'p PageImage>,
    {
        futures::stream::iter(pages)
            .map(|page| self.recognize_page(plugin, page, language, policy, bar))
            .buffered(self.jobs)
            .try_collect()
            .await
    }

    async fn run_page<P: OcrPlugin>(
        &self,
        plugin: &P,
        page: &PageImage,
        language: &LanguageCode,
    ) -> AppResult<RecognitionResult> {
        if !self.detect_orientation {
            return plugin.recognize(page, language).await;
        }
        let orientation = plugin.get_orientation(page, language).await?;
        tracing::debug!(
            page = page.page_number,
            angle = orientation.angle,
            confidence = orientation.confidence,
            "Page orientation"
        );
        let result = plugin.recognize(page, language).await?;
        Ok(result.with_orientation(Some(orientation)))
    }

    async fn recognize_page<P: OcrPlugin>(
        &self,
        plugin: &P,
        page: &PageImage,
        language: &LanguageCode,
        policy: PageErrorPolicy,
        bar: &ProgressBar,
    ) -> AppResult<PageOutcome> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);
        let result = self.run_page(plugin, page, language).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        bar.inc(1);

        match result {
            Ok(result) => {
                tracing::debug!(
                    page = page.page_number,
                    lines = result.lines.len(),
                    "Page recognized"
                );
                Ok(PageOutcome::Recognized(result))
            }
            Err(err) => match policy {
                PageErrorPolicy::Abort => Err(err.for_page(page.page_number)),
                PageErrorPolicy::Skip => {
                    tracing::warn!(page = page.page_number, "Skipping page: {}", err);
                    bar.println(format!("Page {} skipped: {}", page.page_number + 1, err));
                    Ok(PageOutcome::Failed {
                        page: page.geometry(),
                        error: err.to_string(),
                    })
                }
            },
        }
    }
}
