pub mod collections;
pub mod dates;
pub mod list_input;
pub mod resume;

pub use resume::{
    Certification, Education, Experience, Language, PersonalInfo, Proficiency, Project, Resume,
    TemplateId,
};
