//! Portfolio generation: orchestrates the five-step pipeline.
//!
//! Flow: validate upload → extract text → LLM CV JSON → LLM template
//!       bundles → package ZIP.
//!
//! The first failing step aborts the run and is reported by number. Nothing
//! produced by earlier steps is kept.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{parse_ai_response, AiReply};
use crate::cv::normalize_for_portfolio;
use crate::extraction::{validate_upload, DocumentExtractor, FilePart, TempUpload};
use crate::llm_client::LanguageModel;
use crate::portfolio::bundle::parse_bundles;
use crate::portfolio::packager::{package_site, slugify, SiteSource};
use crate::portfolio::prompts::{build_bundle_prompt, build_structure_prompt, BUNDLE_COUNT};

pub const TOTAL_STEPS: u8 = 5;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Advisory progress event. Emitted before and after every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub step: u8,
    pub total_steps: u8,
    /// Percentage of the whole run, 0–100.
    pub progress: u8,
    pub message: String,
}

/// Wire body for a failed run: `{"success": false, "error": ..., "step": N}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("step {step} failed: {error}")]
pub struct PipelineFailure {
    pub success: bool,
    pub error: String,
    pub step: u8,
}

impl PipelineFailure {
    pub fn at(step: u8, error: impl ToString) -> Self {
        Self {
            success: false,
            error: error.to_string(),
            step,
        }
    }
}

#[derive(Debug)]
pub struct PortfolioOutput {
    pub archive: Vec<u8>,
    /// Suggested download name, e.g. `ada-lovelace-portfolio.zip`.
    pub file_name: String,
    /// Name of the packaged bundle.
    pub template_name: String,
    /// How many bundles the model designed.
    pub templates_available: usize,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Validate = 1,
    Extract,
    Structure,
    Design,
    Package,
}

impl Step {
    fn number(self) -> u8 {
        self as u8
    }

    fn started(self) -> &'static str {
        match self {
            Step::Validate => "Validating upload",
            Step::Extract => "Extracting text from PDF",
            Step::Structure => "Structuring CV data",
            Step::Design => "Designing portfolio templates",
            Step::Package => "Packaging website",
        }
    }

    fn finished(self) -> &'static str {
        match self {
            Step::Validate => "Upload is a valid PDF",
            Step::Extract => "Text extracted",
            Step::Structure => "CV data ready",
            Step::Design => "Templates generated",
            Step::Package => "Portfolio ready",
        }
    }

    fn fail(self, error: impl ToString) -> PipelineFailure {
        PipelineFailure::at(self.number(), error)
    }
}

struct Reporter<F: FnMut(Progress)> {
    callback: F,
}

impl<F: FnMut(Progress)> Reporter<F> {
    fn emit(&mut self, step: Step, done: bool) {
        let completed = if done { step.number() } else { step.number() - 1 };
        (self.callback)(Progress {
            step: step.number(),
            total_steps: TOTAL_STEPS,
            progress: (u16::from(completed) * 100 / u16::from(TOTAL_STEPS)) as u8,
            message: if done { step.finished() } else { step.started() }.to_string(),
        });
    }

    fn start(&mut self, step: Step) {
        self.emit(step, false);
    }

    fn finish(&mut self, step: Step) {
        self.emit(step, true);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub struct PortfolioPipeline<'a> {
    extractor: &'a DocumentExtractor,
    llm: &'a dyn LanguageModel,
    upload_dir: &'a Path,
    max_upload_bytes: u64,
}

impl<'a> PortfolioPipeline<'a> {
    pub fn new(
        extractor: &'a DocumentExtractor,
        llm: &'a dyn LanguageModel,
        upload_dir: &'a Path,
        max_upload_bytes: u64,
    ) -> Self {
        Self {
            extractor,
            llm,
            upload_dir,
            max_upload_bytes,
        }
    }

    /// Runs all five steps for `file`, packaging the bundle at
    /// `template_index`.
    pub async fn run<F: FnMut(Progress)>(
        &self,
        file: &FilePart,
        template_index: usize,
        on_progress: F,
    ) -> Result<PortfolioOutput, PipelineFailure> {
        let mut reporter = Reporter {
            callback: on_progress,
        };

        // Step 1: validate
        reporter.start(Step::Validate);
        validate_upload(
            file.content_type.as_deref(),
            file.bytes.len() as u64,
            self.max_upload_bytes,
        )
        .map_err(|e| Step::Validate.fail(e))?;
        reporter.finish(Step::Validate);

        // Step 2: extract. The upload is removed as soon as this block ends.
        reporter.start(Step::Extract);
        let extraction = {
            let upload = TempUpload::persist(self.upload_dir, &file.bytes)
                .await
                .map_err(|e| Step::Extract.fail(format!("Failed to save upload: {e}")))?;
            self.extractor
                .extract(upload.path())
                .await
                .map_err(|e| Step::Extract.fail(e))?
        };
        info!(
            "Portfolio: extracted {} chars via {:?}",
            extraction.text.chars().count(),
            extraction.method
        );
        reporter.finish(Step::Extract);

        // Step 3: CV JSON
        reporter.start(Step::Structure);
        let reply = self
            .llm
            .generate(&build_structure_prompt(&extraction.text))
            .await
            .map_err(|e| Step::Structure.fail(e))?;
        let AiReply::Parsed(object) = parse_ai_response(&reply) else {
            return Err(Step::Structure.fail("Model did not return CV data as JSON"));
        };
        let cv = normalize_for_portfolio(Value::Object(object))
            .map_err(|e| Step::Structure.fail(e))?;
        info!("Portfolio: CV structured for {}", cv.display_name());
        reporter.finish(Step::Structure);

        // Step 4: template bundles
        reporter.start(Step::Design);
        let cv_json = serde_json::to_string_pretty(&cv).map_err(|e| Step::Design.fail(e))?;
        let reply = self
            .llm
            .generate(&build_bundle_prompt(&cv_json))
            .await
            .map_err(|e| Step::Design.fail(e))?;
        let bundles = parse_bundles(&reply).map_err(|e| Step::Design.fail(e))?;
        if bundles.len() != BUNDLE_COUNT {
            warn!(
                "Portfolio: expected {BUNDLE_COUNT} templates, model returned {}",
                bundles.len()
            );
        }
        reporter.finish(Step::Design);

        // Step 5: package
        reporter.start(Step::Package);
        let bundle = bundles.get(template_index).ok_or_else(|| {
            Step::Package.fail(format!(
                "Template index {template_index} is out of range; {} templates available",
                bundles.len()
            ))
        })?;
        let archive = package_site(
            SiteSource {
                template_name: &bundle.name,
                html: &bundle.html,
                css: &bundle.css,
                js: bundle.js.as_deref(),
            },
            &cv,
        )
        .map_err(|e| Step::Package.fail(e))?;
        reporter.finish(Step::Package);

        info!(
            "Portfolio: packaged template '{}' ({} bytes)",
            bundle.name,
            archive.len()
        );

        Ok(PortfolioOutput {
            archive,
            file_name: format!("{}-portfolio.zip", slugify(cv.display_name())),
            template_name: bundle.name.clone(),
            templates_available: bundles.len(),
        })
    }
}
