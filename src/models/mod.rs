pub mod course;
pub mod enrollment;
pub mod module;

pub use course::{Course, CourseRequest, CourseStatus, NewCourse};
pub use enrollment::{Enrollment, EnrollmentRole, EnrollmentStatus};
pub use module::{Module, ModuleRequest, NewModule};
