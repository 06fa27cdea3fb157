pub mod request;
pub mod response;

pub use request::{AnalysisRequest, SubmissionKind, UploadFile};
pub use response::{AnalysisResult, CareerMatch, ErrorBody, LearningPath, SkillGaps};
