use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Types persisted in `LocalStorage` under a fixed key.
pub(crate) trait StorageKey: Serialize + DeserializeOwned {
    const KEY: &'static str;

    fn local_load() -> Option<Self> {
        match LocalStorage::get(Self::KEY) {
            Ok(value) => Some(value),
            Err(StorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log::warn!("could not load {}: {:?}", Self::KEY, err);
                None
            }
        }
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(Self::KEY, self) {
            log::error!("could not save {}: {:?}", Self::KEY, err);
        }
    }
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        T::local_load().unwrap_or_default()
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn format_for_counter(num: u32) -> String {
    format!("{:03}", num.min(999))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_clamped_to_three_digits() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(5000), "999");
    }
}
