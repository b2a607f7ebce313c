// Portfolio generation: CV upload → LLM-designed static site → ZIP download.
// All LLM calls go through llm_client.

pub mod bundle;
pub mod handlers;
pub mod orchestrator;
pub mod packager;
pub mod prompts;

pub use orchestrator::{PipelineFailure, PortfolioPipeline};
pub use packager::{package_site, slugify, SiteSource};
