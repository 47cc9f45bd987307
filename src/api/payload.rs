//! Multipart form payloads.

/// A binary file part (student photo, captured frame).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(Upload),
}

/// Ordered `multipart/form-data` fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<(&'static str, FormValue)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((name, FormValue::Text(value.into())));
        self
    }

    pub fn file(mut self, name: &'static str, upload: Upload) -> Self {
        self.fields.push((name, FormValue::File(upload)));
        self
    }

    pub fn fields(&self) -> &[(&'static str, FormValue)] {
        &self.fields
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(field, value)| match value {
            FormValue::Text(text) if *field == name => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn get_file(&self, name: &str) -> Option<&Upload> {
        self.fields.iter().find_map(|(field, value)| match value {
            FormValue::File(upload) if *field == name => Some(upload),
            _ => None,
        })
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }
}
