pub mod document_assembler;
pub mod field_extractor;
pub mod image_fetcher;
pub mod payload_recovery;
pub mod record_normalizer;
pub mod section_grouper;

pub use document_assembler::{AssemblyPlan, DocumentAssembler};
pub use field_extractor::{parse_html_field, FieldContent};
pub use image_fetcher::{resolve_image_url, ImageFetcher, ImageOutcome};
pub use payload_recovery::{recover_json, RecoveryStrategy};
pub use record_normalizer::process_data;
pub use section_grouper::{group_by_section, SectionGroups};
