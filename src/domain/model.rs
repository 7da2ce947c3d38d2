use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The four line kinds of the input format, keyed by their initial letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Person,
    FamilyMember,
    Address,
    Phone,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Person,
        RecordKind::FamilyMember,
        RecordKind::Address,
        RecordKind::Phone,
    ];

    pub fn initial(self) -> char {
        match self {
            RecordKind::Person => 'P',
            RecordKind::FamilyMember => 'F',
            RecordKind::Address => 'A',
            RecordKind::Phone => 'T',
        }
    }

    /// Field names in positional order. The length bounds the number of
    /// values a line of this kind may carry.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            RecordKind::Person => &["firstName", "lastName"],
            RecordKind::FamilyMember => &["name", "born"],
            RecordKind::Address => &["street", "city", "postalCode"],
            RecordKind::Phone => &["mobile", "landline"],
        }
    }

    pub fn from_initial(initial: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.initial() == initial)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Person => "person",
            RecordKind::FamilyMember => "family member",
            RecordKind::Address => "address",
            RecordKind::Phone => "phone",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Phone and address slots shared by people and family members.
///
/// A repeated T or A line replaces the previous value but keeps the slot's
/// position. Slots serialize in the order they were first filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Contact {
    phone: Option<Phone>,
    address: Option<Address>,
    #[serde(skip)]
    first: Option<RecordKind>,
}

impl Contact {
    pub fn phone(&self) -> Option<&Phone> {
        self.phone.as_ref()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn set_phone(&mut self, phone: Phone) {
        self.first.get_or_insert(RecordKind::Phone);
        self.phone = Some(phone);
    }

    pub fn set_address(&mut self, address: Address) {
        self.first.get_or_insert(RecordKind::Address);
        self.address = Some(address);
    }
}

impl Serialize for Contact {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.first == Some(RecordKind::Address) {
            if let Some(address) = &self.address {
                map.serialize_entry("address", address)?;
            }
            if let Some(phone) = &self.phone {
                map.serialize_entry("phone", phone)?;
            }
        } else {
            if let Some(phone) = &self.phone {
                map.serialize_entry("phone", phone)?;
            }
            if let Some(address) = &self.address {
                map.serialize_entry("address", address)?;
            }
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub born: Option<String>,
    #[serde(flatten)]
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub family: Vec<FamilyMember>,
    #[serde(flatten)]
    pub contact: Contact,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
        }
    }
}

/// Result of the transform stage: the parsed forest and its rendering.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub people: Vec<Person>,
    pub document: String,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_table() {
        assert_eq!(RecordKind::from_initial('P'), Some(RecordKind::Person));
        assert_eq!(RecordKind::from_initial('F'), Some(RecordKind::FamilyMember));
        assert_eq!(RecordKind::from_initial('A'), Some(RecordKind::Address));
        assert_eq!(RecordKind::from_initial('T'), Some(RecordKind::Phone));
        assert_eq!(RecordKind::from_initial('Z'), None);
        assert_eq!(RecordKind::Address.field_names().len(), 3);
    }

    #[test]
    fn test_person_json_omits_absent_fields() {
        let person = Person {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&person).unwrap();
        assert_eq!(json, r#"{"firstName":"Jane","family":[]}"#);
    }

    fn keys<T: Serialize>(record: &T) -> Vec<String> {
        serde_json::to_value(record)
            .unwrap()
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    fn filled(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_field_table_matches_serialized_keys() {
        let person = Person {
            first_name: filled("Jane"),
            last_name: filled("Doe"),
            ..Default::default()
        };
        let member = FamilyMember {
            name: filled("Sam"),
            born: filled("2001"),
            ..Default::default()
        };
        let address = Address {
            street: filled("Main St"),
            city: filled("Springfield"),
            postal_code: filled("00001"),
        };
        let phone = Phone {
            mobile: filled("1"),
            landline: filled("2"),
        };

        assert_eq!(keys(&person)[..2], *RecordKind::Person.field_names());
        assert_eq!(keys(&member), RecordKind::FamilyMember.field_names());
        assert_eq!(keys(&address), RecordKind::Address.field_names());
        assert_eq!(keys(&phone), RecordKind::Phone.field_names());
    }

    #[test]
    fn test_contact_keeps_first_attachment_order() {
        let mut contact = Contact::default();
        contact.set_address(Address::default());
        contact.set_phone(Phone::default());
        contact.set_address(Address {
            city: filled("Springfield"),
            ..Default::default()
        });

        assert_eq!(keys(&contact), vec!["address", "phone"]);
        assert_eq!(
            contact.address().unwrap().city.as_deref(),
            Some("Springfield")
        );

        let mut contact = Contact::default();
        contact.set_phone(Phone::default());
        contact.set_address(Address::default());
        assert_eq!(keys(&contact), vec!["phone", "address"]);
    }
}
