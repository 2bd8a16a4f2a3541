//! Edit command scenarios against an address book loaded from disk.

mod common;
use common::*;

use modbook_core::{Email, EditDescriptor, Name, Phone, RoleEditOperation, Tag};
use modbook::{AddressBook, EditCommand, EditError, Index, NameFilter};

fn load(dir: &std::path::Path) -> AddressBook {
    AddressBook::load(&book_path(dir)).expect("sample book should load")
}

fn edit(book: &mut AddressBook, index: usize, descriptor: EditDescriptor) -> Result<String, EditError> {
    let command = EditCommand::new(Index::from_one_based(index), descriptor)?;
    command.execute(book).map(|r| r.feedback)
}

#[test]
fn edit_then_save_then_reload() {
    let dir = setup_book();
    let mut book = load(dir.path());
    let descriptor = EditDescriptor::builder()
        .name(Name::new("Alex Tan").unwrap())
        .tags([Tag::new("cs").unwrap()])
        .build();
    let feedback = edit(&mut book, 1, descriptor).unwrap();
    assert!(feedback.starts_with("Change(s) made: \nName: Alex Yeoh -> Alex Tan\nTags: [friends] -> [cs]\n"));
    book.save(&book_path(dir.path())).unwrap();

    let reloaded = load(dir.path());
    assert_eq!(reloaded, book);
    assert_eq!(reloaded.persons()[0].name().as_str(), "Alex Tan");
}

#[test]
fn rejected_edits_never_touch_the_book() {
    let dir = setup_book();
    let mut book = load(dir.path());
    let before = book.clone();

    let attempts = [
        EditDescriptor::builder()
            .phone(Phone::new("98765432").unwrap())
            .build(),
        EditDescriptor::builder()
            .email(Email::new("charlotte@example.com").unwrap())
            .build(),
        EditDescriptor::builder()
            .name(Name::new("Someone Else").unwrap())
            .phone(Phone::new("98765432").unwrap())
            .email(Email::new("charlotte@example.com").unwrap())
            .build(),
        EditDescriptor::builder()
            .role_edit("-ST2334".parse::<RoleEditOperation>().unwrap())
            .build(),
    ];
    let expected = [
        "This phone number already exists in the address book",
        "This email already exists in the address book.",
        "This email and this phone number already exist in the address book.",
        "Edit failed due to invalid values provided: \nModule code ST2334 does not exist for this person.",
    ];
    for (descriptor, message) in attempts.into_iter().zip(expected) {
        let err = edit(&mut book, 1, descriptor).unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(book, before);
    }
}

#[test]
fn keeping_own_phone_and_email_is_not_a_duplicate() {
    let dir = setup_book();
    let mut book = load(dir.path());
    let descriptor = EditDescriptor::builder()
        .phone(Phone::new("98765432").unwrap())
        .email(Email::new("bernice@example.com").unwrap())
        .build();
    let feedback = edit(&mut book, 2, descriptor).unwrap();
    assert!(feedback.starts_with("No changes made.\nEdited Person: Bernice Yu"));
}

#[test]
fn filter_is_reset_after_a_successful_edit() {
    let dir = setup_book();
    let mut book = load(dir.path());
    book.set_filter(NameFilter::new(["yu"]));
    assert_eq!(book.filtered().len(), 1);
    let descriptor = EditDescriptor::builder().clear_tags().build();
    edit(&mut book, 1, descriptor).unwrap();
    assert_eq!(book.filtered().len(), 3);
    assert!(book.persons()[1].tags().is_empty());
}

#[test]
fn filter_is_kept_after_a_failed_edit() {
    let dir = setup_book();
    let mut book = load(dir.path());
    book.set_filter(NameFilter::new(["yu"]));
    let descriptor = EditDescriptor::builder()
        .phone(Phone::new("91234567").unwrap())
        .build();
    assert!(edit(&mut book, 1, descriptor).is_err());
    assert!(book.is_filtered());
}
