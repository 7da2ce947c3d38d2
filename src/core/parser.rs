//! Record parser for the pipe-delimited people format.
//!
//! Each line is `<initial>|<field>|<field>...`. `P` starts a new person,
//! `F` appends a family member to the last person, and `T`/`A` attach a
//! phone/address to the last family member of the last person, or to the
//! person itself when it has no family yet.

use crate::domain::model::{Address, Contact, FamilyMember, Person, Phone, RecordKind};
use crate::utils::error::{ParseError, ParseErrorKind};

type LineResult<T> = std::result::Result<T, ParseErrorKind>;

/// Positional values of a line, after the initial letter has been checked.
/// Values run out quietly: a short line leaves trailing fields absent.
struct Fields<'a> {
    values: std::str::Split<'a, char>,
}

impl Fields<'_> {
    fn next_value(&mut self) -> Option<String> {
        self.values.next().map(str::to_string)
    }
}

/// Splits `line` on `|` and checks it against the field table of `kind`.
fn split_record(line: &str, kind: RecordKind) -> LineResult<Fields<'_>> {
    let mut values = line.split('|');
    let actual = values.next().unwrap_or_default();
    let expected = kind.initial();

    let mut initial = actual.chars();
    if initial.next() != Some(expected) || initial.next().is_some() {
        return Err(ParseErrorKind::InitialLetterMismatch {
            expected,
            found: actual.to_string(),
        });
    }

    let limit = kind.field_names().len();
    let found = values.clone().count();
    if found > limit {
        return Err(ParseErrorKind::TooManyFields {
            expected: limit,
            found,
        });
    }

    Ok(Fields { values })
}

fn person_from(mut fields: Fields<'_>) -> Person {
    Person {
        first_name: fields.next_value(),
        last_name: fields.next_value(),
        family: Vec::new(),
        contact: Contact::default(),
    }
}

fn family_member_from(mut fields: Fields<'_>) -> FamilyMember {
    FamilyMember {
        name: fields.next_value(),
        born: fields.next_value(),
        contact: Contact::default(),
    }
}

fn phone_from(mut fields: Fields<'_>) -> Phone {
    Phone {
        mobile: fields.next_value(),
        landline: fields.next_value(),
    }
}

fn address_from(mut fields: Fields<'_>) -> Address {
    Address {
        street: fields.next_value(),
        city: fields.next_value(),
        postal_code: fields.next_value(),
    }
}

/// Contact slots that a T or A line attaches to right now.
fn contact_target(people: &mut [Person]) -> Option<&mut Contact> {
    let person = people.last_mut()?;
    Some(match person.family.last_mut() {
        Some(member) => &mut member.contact,
        None => &mut person.contact,
    })
}

fn apply_line(mut people: Vec<Person>, line: &str) -> LineResult<Vec<Person>> {
    let initial = line.chars().next().ok_or(ParseErrorKind::EmptyLine)?;
    let kind =
        RecordKind::from_initial(initial).ok_or(ParseErrorKind::UnknownRecordKind(initial))?;

    match kind {
        RecordKind::Person => {
            let person = person_from(split_record(line, kind)?);
            people.push(person);
        }
        RecordKind::FamilyMember => {
            let last = people.len().checked_sub(1).ok_or(ParseErrorKind::OrphanFamily)?;
            let member = family_member_from(split_record(line, kind)?);
            people[last].family.push(member);
        }
        RecordKind::Phone => {
            let phone = phone_from(split_record(line, kind)?);
            let target =
                contact_target(&mut people).ok_or(ParseErrorKind::OrphanContact(kind))?;
            target.set_phone(phone);
        }
        RecordKind::Address => {
            let address = address_from(split_record(line, kind)?);
            let target =
                contact_target(&mut people).ok_or(ParseErrorKind::OrphanContact(kind))?;
            target.set_address(address);
        }
    }

    Ok(people)
}

/// Parses the whole input into people, in input order.
///
/// Lines are separated by `\n`. Every line, including a trailing one, must be
/// non-empty. The first invalid line aborts the parse.
pub fn parse(text: &str) -> Result<Vec<Person>, ParseError> {
    text.split('\n')
        .enumerate()
        .try_fold(Vec::new(), |people, (index, line)| {
            tracing::trace!(line = index + 1, "parsing {:?}", line);
            apply_line(people, line).map_err(|kind| ParseError {
                line: index + 1,
                kind,
            })
        })
}
