use serde_json::Value;

use super::{present, ObySection, SectionOutput};
use crate::mapping::domain::ClientDetails;

const DEFAULT_CONTACT_METHOD: &str = "email";
const DEFAULT_LANGUAGE: &str = "english";

pub fn map_contact(client: Option<&ClientDetails>) -> SectionOutput {
    let mut fields = ObySection::new();
    fields.insert(
        "OBY-C-EMAIL".to_string(),
        text(client.and_then(|c| present(&c.email))),
    );
    fields.insert(
        "OBY-C-PHONE".to_string(),
        text(client.and_then(|c| present(&c.phone))),
    );
    fields.insert(
        "OBY-C-PREFERRED-CONTACT".to_string(),
        Value::from(DEFAULT_CONTACT_METHOD),
    );
    fields.insert(
        "OBY-C-PREFERRED-LANGUAGE".to_string(),
        Value::from(DEFAULT_LANGUAGE),
    );
    SectionOutput::new(fields)
}

pub fn map_addresses(client: Option<&ClientDetails>) -> SectionOutput {
    let mut fields = ObySection::new();
    fields.insert(
        "OBY-ADDR-CURRENT-STREET".to_string(),
        text(client.and_then(|c| present(&c.address))),
    );
    fields.insert(
        "OBY-ADDR-CURRENT-CITY".to_string(),
        text(client.and_then(|c| present(&c.city))),
    );
    fields.insert(
        "OBY-ADDR-CURRENT-POSTAL".to_string(),
        text(client.and_then(|c| present(&c.postal_code))),
    );
    fields.insert(
        "OBY-ADDR-CURRENT-COUNTRY".to_string(),
        text(client.and_then(|c| present(&c.country))),
    );
    fields.insert("OBY-ADDR-MAILING-SAME".to_string(), Value::Bool(true));
    SectionOutput::new(fields)
}

fn text(value: Option<&str>) -> Value {
    Value::String(value.unwrap_or_default().to_string())
}
