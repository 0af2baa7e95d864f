use rand::Rng;
use time::OffsetDateTime;
use uuid::Uuid;

pub trait StrExt: AsRef<str> {
    fn nonblank_to_some(&self) -> Option<String> {
        Some(self.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    }
}

impl<T: AsRef<str>> StrExt for T {}

/// Version 7 uuids so that ids sort in creation order.
pub fn make_uuid<R: Rng>(rng: &mut R, at: OffsetDateTime) -> Uuid {
    let millis = (at.unix_timestamp_nanos() / 1_000_000).max(0) as u64;
    uuid::Builder::from_unix_timestamp_millis(millis, &rng.random())
        .into_uuid()
}

#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
        std::process::exit(1)
    }};
}
