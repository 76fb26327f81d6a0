pub mod activity;
pub mod platform;
pub mod profile;
pub mod user;

pub use activity::{Activity, ActivityChanges, ActivityData};
pub use platform::{PlatformChanges, PlatformConfig};
pub use profile::{Profile, ProfileChanges, ProfileData, ProfileWithUser};
pub use user::{User, UserChanges};
