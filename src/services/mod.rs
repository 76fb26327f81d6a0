pub mod activities_service;
pub mod auth_service;
pub mod platform_service;
pub mod profile_service;
pub mod users_service;

pub use activities_service::ActivitiesService;
pub use auth_service::AuthService;
pub use platform_service::PlatformService;
pub use profile_service::ProfileService;
pub use users_service::UsersService;
