// Resume extraction core.
// Plain text in, one `ResumeRecord` out. Each field extractor is a pure
// function over the text; `builder::ResumeParser` composes them around a
// single entity-tagger call.

pub mod builder;
pub mod certifications;
pub mod education;
pub mod experience;
pub mod handlers;
pub mod personal;
pub mod projects;
pub mod record;
pub mod skills;
pub mod tagger;

pub use builder::ResumeParser;
