pub mod julian;
pub mod overrides;
pub mod resolver;

pub use julian::julian_day;
pub use overrides::apply_country_override;
pub use resolver::{
    format_utc_offset, resolve_local_time, timezone_info, DstNotice, ResolvedInstant, TimeError,
    TimezoneInfo,
};
