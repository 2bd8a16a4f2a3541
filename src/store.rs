//! In-memory address book with JSON persistence.
//!
//! The book holds every [`ContactRecord`] plus an optional name filter that
//! defines the "displayed" list commands index into. It answers collision
//! queries for the uniqueness check and performs the final replace.
//!
//! The book file is human-readable JSON. Every save is atomic
//! (write-to-temp + fsync + rename), so an interrupted save never leaves a
//! truncated book behind.

use std::fmt;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use modbook_core::{CollisionLookup, ContactRecord};

// ---------------------------------------------------------------------------
// NameFilter
// ---------------------------------------------------------------------------

/// Shows persons whose name contains any of the keywords as a whole word,
/// ignoring case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameFilter {
    keywords: Vec<String>,
}

impl NameFilter {
    /// A filter over `keywords`. Blank keywords are dropped.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Returns `true` if `record` passes the filter.
    #[must_use]
    pub fn matches(&self, record: &ContactRecord) -> bool {
        record
            .name()
            .as_str()
            .split_whitespace()
            .any(|word| self.keywords.iter().any(|k| word.to_lowercase() == *k))
    }
}

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors from loading, saving, or updating an [`AddressBook`].
#[derive(Debug)]
pub enum StoreError {
    /// The book file could not be read or written.
    Io {
        /// The book file.
        path: PathBuf,
        /// What failed.
        message: String,
    },
    /// The book file is not a valid address book.
    Parse {
        /// The book file.
        path: PathBuf,
        /// Parser detail.
        message: String,
    },
    /// The record to replace is not in the book.
    PersonNotFound {
        /// The record that was looked for.
        name: String,
    },
    /// A storage position past the end of the book.
    SlotOutOfRange {
        /// The position asked for.
        slot: usize,
        /// Persons in the book.
        len: usize,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "address book I/O error at {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "address book at {} is invalid: {message}", path.display())
            }
            Self::PersonNotFound { name } => {
                write!(f, "person '{name}' is not in the address book")
            }
            Self::SlotOutOfRange { slot, len } => {
                write!(f, "position {slot} is past the end of the address book ({len} persons)")
            }
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// AddressBook
// ---------------------------------------------------------------------------

/// Every stored contact, in insertion order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddressBook {
    #[serde(default)]
    persons: Vec<ContactRecord>,
    #[serde(skip)]
    filter: Option<NameFilter>,
}

impl PartialEq for AddressBook {
    /// Books are equal when they hold the same persons; the view filter is
    /// not part of the data.
    fn eq(&self, other: &Self) -> bool {
        self.persons == other.persons
    }
}

impl Eq for AddressBook {}

impl AddressBook {
    /// An empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            persons: Vec::new(),
            filter: None,
        }
    }

    /// Append a person.
    pub fn add(&mut self, person: ContactRecord) {
        self.persons.push(person);
    }

    /// All persons, ignoring the filter.
    #[must_use]
    pub fn persons(&self) -> &[ContactRecord] {
        &self.persons
    }

    /// The displayed list: persons passing the current filter.
    #[must_use]
    pub fn filtered(&self) -> Vec<&ContactRecord> {
        self.persons
            .iter()
            .filter(|p| self.filter.as_ref().is_none_or(|f| f.matches(p)))
            .collect()
    }

    /// Restrict the displayed list.
    pub fn set_filter(&mut self, filter: NameFilter) {
        self.filter = Some(filter);
    }

    /// Display every person.
    pub fn show_all(&mut self) {
        self.filter = None;
    }

    /// Returns `true` if the displayed list is currently filtered.
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    /// Storage position of the `i`-th (zero-based) displayed person.
    #[must_use]
    pub fn displayed_slot(&self, i: usize) -> Option<usize> {
        self.persons
            .iter()
            .enumerate()
            .filter(|(_, p)| self.filter.as_ref().is_none_or(|f| f.matches(p)))
            .nth(i)
            .map(|(slot, _)| slot)
    }

    /// Replace the person stored at `slot`.
    ///
    /// # Errors
    /// Returns [`StoreError::SlotOutOfRange`] if `slot` is past the end.
    pub fn replace_at(&mut self, slot: usize, candidate: ContactRecord) -> Result<(), StoreError> {
        let len = self.persons.len();
        let target = self
            .persons
            .get_mut(slot)
            .ok_or(StoreError::SlotOutOfRange { slot, len })?;
        *target = candidate;
        Ok(())
    }

    /// Collision lookup that skips the person stored at `slot`, so an
    /// identical record elsewhere in the book still counts.
    #[must_use]
    pub const fn lookup_excluding(&self, slot: usize) -> SlotLookup<'_> {
        SlotLookup { book: self, slot }
    }

    /// Replace the first stored record equal to `original` with `candidate`,
    /// keeping its position.
    ///
    /// # Errors
    /// Returns [`StoreError::PersonNotFound`] if `original` is not stored.
    pub fn replace(
        &mut self,
        original: &ContactRecord,
        candidate: ContactRecord,
    ) -> Result<(), StoreError> {
        let slot = self
            .persons
            .iter_mut()
            .find(|p| *p == original)
            .ok_or_else(|| StoreError::PersonNotFound {
                name: original.name().to_string(),
            })?;
        *slot = candidate;
        Ok(())
    }

    fn others<'a>(&'a self, excluding: &'a ContactRecord) -> impl Iterator<Item = &'a ContactRecord> {
        self.persons.iter().filter(move |p| *p != excluding)
    }

    // -- persistence --

    /// Load a book from `path`. A missing file is an empty book.
    ///
    /// # Errors
    /// Returns [`StoreError`] on I/O failure or invalid JSON.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no address book yet, starting empty");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.to_owned(),
                    message: format!("read: {e}"),
                });
            }
        };
        let book: Self = serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), persons = book.persons.len(), "loaded address book");
        Ok(book)
    }

    /// Save the book to `path` atomically, creating parent directories.
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] on any filesystem failure.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let io_err = |message: String| StoreError::Io {
            path: path.to_owned(),
            message,
        };

        let json = serde_json::to_string_pretty(self).map_err(|e| io_err(format!("serialize: {e}")))?;

        let dir = match path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d.to_owned(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| io_err(format!("create {}: {e}", dir.display())))?;

        let file_name = path
            .file_name()
            .map_or_else(|| "addressbook".to_owned(), |n| n.to_string_lossy().into_owned());
        let tmp_path = dir.join(format!(".{file_name}.tmp"));
        let mut file = fs::File::create(&tmp_path)
            .map_err(|e| io_err(format!("create {}: {e}", tmp_path.display())))?;
        file.write_all(json.as_bytes())
            .map_err(|e| io_err(format!("write {}: {e}", tmp_path.display())))?;
        file.sync_all()
            .map_err(|e| io_err(format!("fsync {}: {e}", tmp_path.display())))?;
        drop(file);

        fs::rename(&tmp_path, path).map_err(|e| {
            io_err(format!(
                "rename {} → {}: {e}",
                tmp_path.display(),
                path.display()
            ))
        })?;
        tracing::debug!(path = %path.display(), persons = self.persons.len(), "saved address book");
        Ok(())
    }
}

/// Answers collisions against every person except the one at `slot`.
///
/// The `excluding` record passed to [`CollisionLookup`] is not consulted.
#[derive(Clone, Copy, Debug)]
pub struct SlotLookup<'a> {
    book: &'a AddressBook,
    slot: usize,
}

impl SlotLookup<'_> {
    fn others(&self) -> impl Iterator<Item = &ContactRecord> {
        self.book
            .persons
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != self.slot)
            .map(|(_, p)| p)
    }
}

impl CollisionLookup for SlotLookup<'_> {
    fn phone_collides(&self, candidate: &ContactRecord, _excluding: &ContactRecord) -> bool {
        candidate
            .phone()
            .is_some_and(|phone| self.others().any(|p| p.phone() == Some(phone)))
    }

    fn email_collides(&self, candidate: &ContactRecord, _excluding: &ContactRecord) -> bool {
        candidate
            .email()
            .is_some_and(|email| self.others().any(|p| p.email() == Some(email)))
    }
}

/// Value-equality exclusion: every record equal to `excluding` is skipped.
impl CollisionLookup for AddressBook {
    fn phone_collides(&self, candidate: &ContactRecord, excluding: &ContactRecord) -> bool {
        candidate
            .phone()
            .is_some_and(|phone| self.others(excluding).any(|p| p.phone() == Some(phone)))
    }

    fn email_collides(&self, candidate: &ContactRecord, excluding: &ContactRecord) -> bool {
        candidate
            .email()
            .is_some_and(|email| self.others(excluding).any(|p| p.email() == Some(email)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use modbook_core::{Email, Name, Phone};

    fn person(name: &str, phone: &str, email: &str) -> ContactRecord {
        ContactRecord::new(Name::new(name).unwrap())
            .with_phone(Some(Phone::new(phone).unwrap()))
            .with_email(Some(Email::new(email).unwrap()))
    }

    fn sample() -> AddressBook {
        let mut book = AddressBook::new();
        book.add(person("Alex Yeoh", "91234567", "alex@x.com"));
        book.add(person("Bernice Yu", "99272758", "bernice@x.com"));
        book.add(person("Charlotte Oliveiro", "93210283", "charlotte@x.com"));
        book
    }

    #[test]
    fn filter_matches_whole_words_case_insensitive() {
        let mut book = sample();
        book.set_filter(NameFilter::new(["yu", "  "]));
        let names: Vec<&str> = book.filtered().iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, vec!["Bernice Yu"]);
        book.set_filter(NameFilter::new(["Ale"]));
        assert!(book.filtered().is_empty());
        book.show_all();
        assert_eq!(book.filtered().len(), 3);
        assert!(!book.is_filtered());
    }

    #[test]
    fn collisions_exclude_the_edited_record() {
        let book = sample();
        let alex = book.persons()[0].clone();
        // Alex keeps the same phone: not a collision.
        assert!(!book.phone_collides(&alex, &alex));
        // Alex takes Bernice's phone: a collision.
        let candidate = alex.clone().with_phone(Some(Phone::new("99272758").unwrap()));
        assert!(book.phone_collides(&candidate, &alex));
        assert!(!book.email_collides(&candidate, &alex));
    }

    #[test]
    fn absent_values_never_collide() {
        let book = sample();
        let alex = book.persons()[0].clone();
        let candidate = alex.clone().with_phone(None).with_email(None);
        assert!(!book.phone_collides(&candidate, &alex));
        assert!(!book.email_collides(&candidate, &alex));
    }

    #[test]
    fn replace_keeps_position() {
        let mut book = sample();
        let bernice = book.persons()[1].clone();
        let edited = bernice.clone().with_phone(Some(Phone::new("11111111").unwrap()));
        book.replace(&bernice, edited.clone()).unwrap();
        assert_eq!(book.persons()[1], edited);
        assert_eq!(book.persons().len(), 3);
    }

    #[test]
    fn replace_missing_person_fails() {
        let mut book = sample();
        let ghost = person("Ghost", "123", "g@x.com");
        let err = book.replace(&ghost, ghost.clone()).unwrap_err();
        assert!(matches!(err, StoreError::PersonNotFound { .. }));
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn displayed_slot_follows_the_filter() {
        let mut book = sample();
        assert_eq!(book.displayed_slot(2), Some(2));
        assert_eq!(book.displayed_slot(3), None);
        book.set_filter(NameFilter::new(["charlotte", "bernice"]));
        assert_eq!(book.displayed_slot(0), Some(1));
        assert_eq!(book.displayed_slot(1), Some(2));
        assert_eq!(book.displayed_slot(2), None);
    }

    #[test]
    fn replace_at_touches_only_that_slot() {
        let mut book = sample();
        let copy = book.persons()[0].clone();
        book.add(copy);
        let edited = person("Alex Tan", "91234567", "alex@x.com");
        book.replace_at(3, edited.clone()).unwrap();
        assert_eq!(book.persons()[0].name().as_str(), "Alex Yeoh");
        assert_eq!(book.persons()[3], edited);

        let err = book.replace_at(4, edited).unwrap_err();
        assert!(matches!(err, StoreError::SlotOutOfRange { slot: 4, len: 4 }));
        assert_eq!(
            err.to_string(),
            "position 4 is past the end of the address book (4 persons)"
        );
    }

    #[test]
    fn slot_lookup_sees_identical_records_elsewhere() {
        let mut book = sample();
        let copy = book.persons()[0].clone();
        book.add(copy);
        let alex = book.persons()[0].clone();
        // The copy at slot 3 still holds Alex's phone and email.
        assert!(book.lookup_excluding(0).phone_collides(&alex, &alex));
        assert!(book.lookup_excluding(0).email_collides(&alex, &alex));
        // Value equality skips both copies.
        assert!(!book.phone_collides(&alex, &alex));
        assert!(!sample().lookup_excluding(0).phone_collides(&alex, &alex));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("book.json");
        let book = sample();
        book.save(&path).unwrap();
        assert!(!dir.path().join("nested").join(".book.json.tmp").exists());
        let loaded = AddressBook::load(&path).unwrap();
        assert_eq!(loaded, book);
    }

    #[test]
    fn load_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let book = AddressBook::load(&dir.path().join("none.json")).unwrap();
        assert!(book.persons().is_empty());
    }

    #[test]
    fn load_rejects_invalid_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");
        fs::write(&path, r#"{"persons":[{"name":"Al","phone":"12"}]}"#).unwrap();
        let err = AddressBook::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }), "got {err:?}");
    }
}
