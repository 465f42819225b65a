pub mod language;
pub mod question;
pub mod series;

pub use language::Lang;
pub use question::{option_label, OptionEntry, QuestionRecord, SectionGroup, OPTION_LABELS};
pub use series::{SeriesList, SeriesSummary};
