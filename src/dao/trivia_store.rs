//! Prompt and submission persistence on top of a [`KeyValueStore`].
//!
//! Reads never fail from the caller's point of view: a missing or corrupt
//! record is logged and treated as "no data". Writes report failures through
//! [`StorageResult`] and leave the previous record in place.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Serialize, de::DeserializeOwned};
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    clock::{Clock, format_date},
    config::PromptTemplate,
    dao::{
        kv::KeyValueStore,
        models::{PromptCollection, PromptEntity, SubmissionEntity},
        storage::{StorageError, StorageResult},
    },
};

/// Key of the prompt collection record.
pub const PROMPTS_KEY: &str = "dailyTriviaData";
/// Key of the submission list record.
pub const SUBMISSIONS_KEY: &str = "dailyTriviaSubmissions";

/// Persistence layer owning the prompt and submission collections.
pub struct TriviaStore {
    kv: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    default_prompt: PromptTemplate,
    write_gate: Mutex<()>,
}

impl TriviaStore {
    /// Build a store over `kv`, seeding `default_prompt` when no prompt exists.
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        default_prompt: PromptTemplate,
    ) -> Self {
        Self {
            kv,
            clock,
            default_prompt,
            write_gate: Mutex::new(()),
        }
    }

    /// Today's date as stored in prompts.
    pub fn today(&self) -> String {
        format_date(self.clock.today())
    }

    /// Current instant according to the store's clock.
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Prompt for today, else the latest stored prompt, else the seeded default.
    pub fn todays_prompt(&self) -> PromptEntity {
        let today = self.today();

        if let Some(collection) = self.read_prompts() {
            let mut prompts = collection.prompts;
            if let Some(index) = prompts.iter().position(|prompt| prompt.date == today) {
                return prompts.swap_remove(index);
            }
            if let Some(latest) = prompts.into_iter().max_by(|a, b| a.date.cmp(&b.date)) {
                debug!(date = %latest.date, "no prompt for today; using latest");
                return latest;
            }
        }

        let prompt = self.default_prompt.instantiate(today);
        match self.save_prompt(prompt.clone()) {
            Ok(()) => info!(date = %prompt.date, "seeded default prompt"),
            Err(err) => warn!(error = %err, "failed to persist default prompt"),
        }
        prompt
    }

    /// Insert `prompt`, replacing any prompt with the same date, and keep the
    /// collection sorted by date.
    pub fn save_prompt(&self, prompt: PromptEntity) -> StorageResult<()> {
        let _gate = self.lock_gate();
        let mut collection = self.read_prompts().unwrap_or_default();

        match collection
            .prompts
            .iter_mut()
            .find(|existing| existing.date == prompt.date)
        {
            Some(existing) => *existing = prompt,
            None => collection.prompts.push(prompt),
        }
        collection.prompts.sort_by(|a, b| a.date.cmp(&b.date));

        self.write_record(PROMPTS_KEY, &collection)
    }

    /// Every stored prompt in ascending date order.
    pub fn all_prompts(&self) -> Vec<PromptEntity> {
        self.read_prompts()
            .map(|collection| collection.prompts)
            .unwrap_or_default()
    }

    /// Every stored submission in submission order.
    pub fn submissions(&self) -> Vec<SubmissionEntity> {
        self.read_record(SUBMISSIONS_KEY).unwrap_or_default()
    }

    /// Append a submission.
    pub fn save_submission(&self, submission: SubmissionEntity) -> StorageResult<()> {
        let _gate = self.lock_gate();
        let mut submissions = self.submissions();
        submissions.push(submission);
        self.write_record(SUBMISSIONS_KEY, &submissions)
    }

    /// Remove the submission with `id`. Unknown ids leave the list unchanged.
    pub fn delete_submission(&self, id: Uuid) -> StorageResult<()> {
        let _gate = self.lock_gate();
        let mut submissions = self.submissions();
        submissions.retain(|submission| submission.id != id);
        self.write_record(SUBMISSIONS_KEY, &submissions)
    }

    /// Remove both records entirely.
    pub fn clear_all_data(&self) -> StorageResult<()> {
        let _gate = self.lock_gate();
        for key in [PROMPTS_KEY, SUBMISSIONS_KEY] {
            self.kv.remove(key).inspect_err(|err| {
                warn!(key, error = %err, "failed to clear record");
            })?;
        }
        info!("cleared all stored data");
        Ok(())
    }

    /// Probe the medium by reading the prompt record.
    pub fn health_check(&self) -> StorageResult<()> {
        self.kv.get(PROMPTS_KEY).map(|_| ())
    }

    /// Prompts with a blank ranked answer are unplayable and read as corrupt.
    fn read_prompts(&self) -> Option<PromptCollection> {
        let mut collection: PromptCollection = self.read_record(PROMPTS_KEY)?;
        collection.prompts.retain(|prompt| {
            if prompt.has_blank_answer() {
                warn!(
                    date = %prompt.date,
                    id = %prompt.id,
                    "ignoring stored prompt with a blank answer"
                );
                return false;
            }
            true
        });
        Some(collection)
    }

    fn read_record<T: DeserializeOwned>(&self, key: &'static str) -> Option<T> {
        let raw = match self.kv.get(key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key, error = %err, "failed to read record; treating as empty");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(source) => {
                let err = StorageError::Corrupt { key, source };
                warn!(key, error = %err, "ignoring unreadable record");
                None
            }
        }
    }

    fn write_record<T>(&self, key: &'static str, value: &T) -> StorageResult<()>
    where
        T: Serialize + ?Sized,
    {
        let encoded =
            serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })?;
        self.kv.set(key, &encoded).inspect_err(|err| {
            warn!(key, error = %err, "failed to write record");
        })
    }

    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::{
        clock::FixedClock,
        dao::{
            kv::MemoryKeyValueStore,
            models::{ANSWER_COUNT, SubmissionStatus},
        },
    };

    fn setup() -> (Arc<MemoryKeyValueStore>, Arc<FixedClock>, TriviaStore) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let clock = Arc::new(FixedClock::at(datetime!(2024-01-01 09:00 UTC)));
        let store = TriviaStore::new(kv.clone(), clock.clone(), PromptTemplate::default());
        (kv, clock, store)
    }

    fn prompt(date: &str, question: &str) -> PromptEntity {
        PromptEntity {
            id: Uuid::new_v4(),
            question: question.into(),
            answers: std::array::from_fn::<_, ANSWER_COUNT, _>(|i| format!("answer {}", i + 1)),
            all_possible_answers: Vec::new(),
            date: date.into(),
        }
    }

    fn submission(question: &str) -> SubmissionEntity {
        SubmissionEntity {
            id: Uuid::new_v4(),
            question: question.into(),
            submitted_at: datetime!(2024-01-01 12:00 UTC),
            status: SubmissionStatus::Pending,
            answers: None,
            all_possible_answers: None,
        }
    }

    #[test]
    fn empty_store_seeds_default_prompt_once() {
        let (kv, _clock, store) = setup();

        let first = store.todays_prompt();
        assert_eq!(first.date, "2024-01-01");
        assert_eq!(first.question, PromptTemplate::default().question);
        assert!(kv.get(PROMPTS_KEY).unwrap().is_some());

        let second = store.todays_prompt();
        assert_eq!(first, second);
        assert_eq!(store.all_prompts().len(), 1);
    }

    #[test]
    fn todays_prompt_prefers_exact_date_then_latest() {
        let (_kv, clock, store) = setup();
        store.save_prompt(prompt("2023-12-30", "older")).unwrap();
        store.save_prompt(prompt("2024-01-01", "today")).unwrap();
        store.save_prompt(prompt("2023-12-31", "newer")).unwrap();

        assert_eq!(store.todays_prompt().question, "today");

        clock.set(datetime!(2024-01-02 09:00 UTC));
        assert_eq!(store.todays_prompt().question, "today");
        assert_eq!(store.all_prompts().len(), 3);
    }

    #[test]
    fn latest_fallback_does_not_rely_on_stored_order() {
        let (kv, _clock, store) = setup();
        let unsorted = PromptCollection {
            prompts: vec![
                prompt("2023-12-03", "early december"),
                prompt("2023-12-28", "latest"),
                prompt("2023-11-15", "november"),
            ],
        };
        kv.set(PROMPTS_KEY, &serde_json::to_string(&unsorted).unwrap())
            .unwrap();

        assert_eq!(store.todays_prompt().question, "latest");
        assert_eq!(store.all_prompts().len(), 3);
    }

    #[test]
    fn stored_prompt_with_blank_answer_is_never_served() {
        let (kv, _clock, store) = setup();
        let mut broken = prompt("2024-01-01", "broken");
        broken.answers[9] = "  ".into();
        let record = PromptCollection {
            prompts: vec![prompt("2023-12-31", "playable"), broken],
        };
        kv.set(PROMPTS_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();

        assert_eq!(store.todays_prompt().question, "playable");
        let stored = store.all_prompts();
        assert_eq!(stored.len(), 1);
        assert!(stored.iter().all(|prompt| !prompt.has_blank_answer()));
    }

    #[test]
    fn save_prompt_keeps_collection_sorted() {
        let (_kv, _clock, store) = setup();
        store.save_prompt(prompt("2024-03-01", "c")).unwrap();
        store.save_prompt(prompt("2024-01-01", "a")).unwrap();
        store.save_prompt(prompt("2024-02-01", "b")).unwrap();

        let dates: Vec<_> = store.all_prompts().into_iter().map(|p| p.date).collect();
        assert_eq!(dates, ["2024-01-01", "2024-02-01", "2024-03-01"]);
    }

    #[test]
    fn repeated_saves_of_identical_prompt_are_idempotent() {
        let (kv, _clock, store) = setup();
        let prompt = prompt("2024-01-05", "same");
        store.save_prompt(prompt.clone()).unwrap();
        let snapshot = kv.get(PROMPTS_KEY).unwrap();

        for _ in 0..3 {
            store.save_prompt(prompt.clone()).unwrap();
        }

        assert_eq!(kv.get(PROMPTS_KEY).unwrap(), snapshot);
        assert_eq!(store.all_prompts(), vec![prompt]);
    }

    #[test]
    fn later_save_for_same_date_wins() {
        let (_kv, _clock, store) = setup();
        store.save_prompt(prompt("2024-01-05", "first")).unwrap();
        store.save_prompt(prompt("2024-01-05", "second")).unwrap();

        let prompts = store.all_prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].question, "second");
    }

    #[test]
    fn corrupt_prompt_record_falls_back_to_default() {
        let (kv, _clock, store) = setup();
        kv.set(PROMPTS_KEY, "{ not json").unwrap();

        assert!(store.all_prompts().is_empty());
        let prompt = store.todays_prompt();
        assert_eq!(prompt.question, PromptTemplate::default().question);
        assert_eq!(store.all_prompts(), vec![prompt]);
    }

    #[test]
    fn write_failures_are_reported_and_default_still_returned() {
        let (kv, _clock, store) = setup();
        kv.reject_writes(true);

        assert!(store.save_prompt(prompt("2024-01-01", "x")).is_err());
        assert!(store.save_submission(submission("idea")).is_err());
        assert!(store.clear_all_data().is_err());

        let fallback = store.todays_prompt();
        assert_eq!(fallback.question, PromptTemplate::default().question);
        assert!(store.all_prompts().is_empty());
    }

    #[test]
    fn submissions_append_and_delete_by_id() {
        let (_kv, _clock, store) = setup();
        let first = submission("first idea");
        let second = submission("second idea");
        store.save_submission(first.clone()).unwrap();
        store.save_submission(second.clone()).unwrap();
        assert_eq!(store.submissions(), vec![first.clone(), second.clone()]);

        store.delete_submission(first.id).unwrap();
        assert_eq!(store.submissions(), vec![second.clone()]);

        store.delete_submission(Uuid::new_v4()).unwrap();
        assert_eq!(store.submissions(), vec![second]);
    }

    #[test]
    fn corrupt_submissions_record_reads_empty_and_is_overwritten() {
        let (kv, _clock, store) = setup();
        kv.set(SUBMISSIONS_KEY, "[{ not json").unwrap();

        assert!(store.submissions().is_empty());

        let idea = submission("recovered idea");
        store.save_submission(idea.clone()).unwrap();
        assert_eq!(store.submissions(), vec![idea]);
        let raw = kv.get(SUBMISSIONS_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<Vec<SubmissionEntity>>(&raw).is_ok());
    }

    #[test]
    fn clear_all_data_removes_both_records() {
        let (kv, _clock, store) = setup();
        store.todays_prompt();
        store.save_submission(submission("idea")).unwrap();

        store.clear_all_data().unwrap();

        assert_eq!(kv.get(PROMPTS_KEY).unwrap(), None);
        assert_eq!(kv.get(SUBMISSIONS_KEY).unwrap(), None);
        assert!(store.submissions().is_empty());
    }
}
