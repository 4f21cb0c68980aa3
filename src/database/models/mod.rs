pub mod application;
pub mod profile;
pub mod user;

pub use application::{Application, ApplicationStatus, ApplicationView, ApplicationWithProfile};
pub use profile::Profile;
pub use user::{Role, User, UserInfo};
