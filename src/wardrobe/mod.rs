//! Durable, process-wide collection of saved looks, newest first.
//!
//! The whole collection is rewritten on every mutation. A write rejected
//! for size gets one repair attempt: the newest entry's image is stripped
//! and the write retried. In-memory and durable state never diverge on the
//! happy or repaired path; only a second consecutive failure leaves memory
//! ahead of disk, and that condition is surfaced, not swallowed.

use crate::error::StoreError;
use crate::look::StyledLook;
use chrono::Utc;
use uuid::Uuid;

mod slot;
pub use slot::{FileSlot, StorageSlot};

pub struct Wardrobe {
    looks: Vec<StyledLook>,
    slot: Box<dyn StorageSlot>,
}

/// The pure quota repair: identical collection except the newest entry's
/// image payload (and mime type) are removed. New entries are always
/// prepended, so index 0 is by convention the write that tipped the quota.
pub fn repair(looks: &[StyledLook]) -> Vec<StyledLook> {
    let mut repaired: Vec<StyledLook> = looks.to_vec();
    if let Some(newest) = repaired.first_mut() {
        *newest = newest.without_image();
    }
    repaired
}

impl Wardrobe {
    /// Load the persisted collection. Corrupt or missing data recovers
    /// silently to an empty wardrobe; startup never fails on load.
    pub fn open(slot: Box<dyn StorageSlot>) -> Self {
        let looks = match slot.read() {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(looks) => looks,
                Err(err) => {
                    tracing::warn!("saved looks are corrupt, starting empty: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("failed to load saved looks, starting empty: {err}");
                Vec::new()
            }
        };

        Self { looks, slot }
    }

    /// Newest first.
    pub fn looks(&self) -> &[StyledLook] {
        &self.looks
    }

    pub fn get(&self, id: &str) -> Option<&StyledLook> {
        self.looks.iter().find(|look| look.id.as_deref() == Some(id))
    }

    /// Whether a candidate look is already saved. Equality is exact match
    /// of title and description text, not identifier-based, since a
    /// freshly generated candidate has no identifier yet. Known limitation:
    /// two independent generations that happen to share identical title and
    /// description are indistinguishable here.
    pub fn is_saved(&self, candidate: &StyledLook) -> bool {
        self.looks
            .iter()
            .any(|saved| saved.title == candidate.title && saved.description == candidate.description)
    }

    /// Persist a clone of `look` with a fresh identifier and save
    /// timestamp, prepended. Returns the assigned identifier. On
    /// `Unrecoverable` the entry is still in memory (and visible via
    /// `looks()`), but it may not survive a restart. Callers must tell
    /// the user.
    pub fn save(&mut self, look: &StyledLook) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut entry = look.clone();
        entry.id = Some(id.clone());
        entry.saved_at = Some(Utc::now().to_rfc3339());

        self.looks.insert(0, entry);
        self.write_through()?;
        Ok(id)
    }

    /// Remove exactly the record with the given identifier. Order and all
    /// other entries are untouched. The shrinking write gets no repair
    /// logic; the quota path only exists for net-growth mutations.
    pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.looks.len();
        self.looks.retain(|look| look.id.as_deref() != Some(id));
        if self.looks.len() == before {
            return Ok(false);
        }

        let payload = serde_json::to_string(&self.looks)?;
        self.slot.write(&payload)?;
        Ok(true)
    }

    fn write_through(&mut self) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&self.looks)?;
        match self.slot.write(&payload) {
            Ok(()) => Ok(()),
            Err(StoreError::QuotaExceeded) => {
                tracing::warn!("wardrobe quota hit, retrying without the newest image");
                let repaired = repair(&self.looks);
                let payload = serde_json::to_string(&repaired)?;
                match self.slot.write(&payload) {
                    Ok(()) => {
                        // Disk now holds the stripped entry; memory must
                        // match exactly.
                        self.looks = repaired;
                        Ok(())
                    }
                    Err(StoreError::QuotaExceeded) => Err(StoreError::Unrecoverable),
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::look::{LookImage, MakeupLook};
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn fixture(title: &str, image: Option<&str>) -> StyledLook {
        StyledLook {
            id: None,
            saved_at: None,
            title: title.into(),
            description: format!("{title} description"),
            occasion: "Dinner".into(),
            sections: vec![],
            makeup: MakeupLook {
                style_name: "s".into(),
                eyes: "e".into(),
                lips: "l".into(),
                face: "f".into(),
                tips: "t".into(),
            },
            image: image.map(|data| LookImage {
                mime_type: "image/jpeg".into(),
                data: data.into(),
            }),
            profile: None,
        }
    }

    /// Slot that fails the next N writes with QuotaExceeded, recording
    /// every payload that actually lands.
    struct FlakySlot {
        fail_next: Mutex<u32>,
        stored: Mutex<Option<String>>,
    }

    impl FlakySlot {
        fn failing(times: u32) -> Self {
            Self {
                fail_next: Mutex::new(times),
                stored: Mutex::new(None),
            }
        }
    }

    impl StorageSlot for FlakySlot {
        fn read(&self) -> Result<Option<String>, StoreError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        fn write(&self, payload: &str) -> Result<(), StoreError> {
            let mut fail_next = self.fail_next.lock().unwrap();
            if *fail_next > 0 {
                *fail_next -= 1;
                return Err(StoreError::QuotaExceeded);
            }
            *self.stored.lock().unwrap() = Some(payload.to_string());
            Ok(())
        }
    }

    fn file_wardrobe(tmp: &TempDir) -> Wardrobe {
        Wardrobe::open(Box::new(FileSlot::new(
            tmp.path().join("wardrobe.json"),
            1024 * 1024,
        )))
    }

    #[test]
    fn save_assigns_id_and_timestamp_and_prepends() {
        let tmp = TempDir::new().unwrap();
        let mut wardrobe = file_wardrobe(&tmp);

        wardrobe.save(&fixture("First", None)).unwrap();
        wardrobe.save(&fixture("Second", None)).unwrap();

        assert_eq!(wardrobe.looks().len(), 2);
        assert_eq!(wardrobe.looks()[0].title, "Second");
        assert!(wardrobe.looks()[0].id.is_some());
        assert!(wardrobe.looks()[0].saved_at.is_some());
    }

    #[test]
    fn save_clones_rather_than_aliasing() {
        let tmp = TempDir::new().unwrap();
        let mut wardrobe = file_wardrobe(&tmp);

        let mut displayed = fixture("Gallery Noir", Some("aW1n"));
        wardrobe.save(&displayed).unwrap();

        displayed.title = "mutated after save".into();
        assert_eq!(wardrobe.looks()[0].title, "Gallery Noir");
    }

    #[test]
    fn round_trip_reproduces_collection_exactly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wardrobe.json");

        let mut wardrobe = Wardrobe::open(Box::new(FileSlot::new(path.clone(), 1024 * 1024)));
        wardrobe.save(&fixture("A", Some("aW1hZ2VB"))).unwrap();
        wardrobe.save(&fixture("B", None)).unwrap();
        let saved = wardrobe.looks().to_vec();

        let reloaded = Wardrobe::open(Box::new(FileSlot::new(path, 1024 * 1024)));
        assert_eq!(reloaded.looks(), saved.as_slice());
    }

    #[test]
    fn corrupt_slot_recovers_to_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wardrobe.json");
        std::fs::write(&path, "{ not json").unwrap();

        let wardrobe = Wardrobe::open(Box::new(FileSlot::new(path, 1024 * 1024)));
        assert!(wardrobe.looks().is_empty());
    }

    #[test]
    fn quota_failure_strips_newest_image_and_keeps_memory_in_sync() {
        let mut wardrobe = Wardrobe::open(Box::new(FlakySlot::failing(0)));
        wardrobe.save(&fixture("B", Some("aW1hZ2VC"))).unwrap();

        // Swap in a slot that rejects the next write once, then accepts.
        wardrobe.slot = Box::new(FlakySlot::failing(1));
        wardrobe.save(&fixture("A", Some("aW1hZ2VB"))).unwrap();

        // Newest entry (A) lost its image; older entry (B) kept its own.
        assert_eq!(wardrobe.looks()[0].title, "A");
        assert!(wardrobe.looks()[0].image.is_none());
        assert_eq!(
            wardrobe.looks()[1].image.as_ref().map(|i| i.data.as_str()),
            Some("aW1hZ2VC")
        );

        // Durable state matches memory exactly.
        let persisted: Vec<StyledLook> =
            serde_json::from_str(&wardrobe.slot.read().unwrap().unwrap()).unwrap();
        assert_eq!(persisted, wardrobe.looks());
    }

    #[test]
    fn second_consecutive_quota_failure_is_unrecoverable_but_keeps_the_entry() {
        let mut wardrobe = Wardrobe::open(Box::new(FlakySlot::failing(2)));

        let err = wardrobe.save(&fixture("A", Some("aW1hZ2VB"))).unwrap_err();
        assert!(matches!(err, StoreError::Unrecoverable));

        // Mutation is not rolled back: the look is still in memory, image
        // intact, even though it never reached the slot.
        assert_eq!(wardrobe.looks().len(), 1);
        assert!(wardrobe.looks()[0].image.is_some());
        assert!(wardrobe.slot.read().unwrap().is_none());
    }

    #[test]
    fn delete_removes_exactly_the_matching_record() {
        let tmp = TempDir::new().unwrap();
        let mut wardrobe = file_wardrobe(&tmp);
        wardrobe.save(&fixture("C", None)).unwrap();
        let b_id = wardrobe.save(&fixture("B", None)).unwrap();
        wardrobe.save(&fixture("A", None)).unwrap();

        assert!(wardrobe.delete(&b_id).unwrap());

        let titles: Vec<&str> = wardrobe.looks().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert!(!wardrobe.delete(&b_id).unwrap());
    }

    #[test]
    fn delete_persists_the_shrunk_collection() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wardrobe.json");
        let mut wardrobe = Wardrobe::open(Box::new(FileSlot::new(path.clone(), 1024 * 1024)));
        let id = wardrobe.save(&fixture("A", None)).unwrap();
        wardrobe.delete(&id).unwrap();

        let reloaded = Wardrobe::open(Box::new(FileSlot::new(path, 1024 * 1024)));
        assert!(reloaded.looks().is_empty());
    }

    #[test]
    fn is_saved_matches_on_title_and_description_not_id() {
        let tmp = TempDir::new().unwrap();
        let mut wardrobe = file_wardrobe(&tmp);
        wardrobe.save(&fixture("Gallery Noir", None)).unwrap();

        // Fresh candidate, no id, same text.
        let candidate = fixture("Gallery Noir", None);
        assert!(candidate.id.is_none());
        assert!(wardrobe.is_saved(&candidate));

        let mut different = fixture("Gallery Noir", None);
        different.description = "another description".into();
        assert!(!wardrobe.is_saved(&different));
    }

    #[test]
    fn repair_only_touches_the_newest_entry() {
        let newest = fixture("A", Some("aW1hZ2VB"));
        let older = fixture("B", Some("aW1hZ2VC"));
        let repaired = repair(&[newest, older]);

        assert!(repaired[0].image.is_none());
        assert!(repaired[1].image.is_some());
    }

    #[test]
    fn repair_of_empty_collection_is_empty() {
        assert!(repair(&[]).is_empty());
    }

    #[test]
    fn get_finds_saved_look_by_id() {
        let tmp = TempDir::new().unwrap();
        let mut wardrobe = file_wardrobe(&tmp);
        let id = wardrobe.save(&fixture("A", None)).unwrap();

        assert!(wardrobe.get(&id).is_some());
        assert!(wardrobe.get("missing").is_none());
    }
}
