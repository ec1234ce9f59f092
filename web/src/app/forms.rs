//! Submitted forms and their validation
//!
//! Raw form structs are deserialized straight from urlencoded bodies and keep
//! the user's input so an invalid form can be shown again. `clean()` performs
//! the checks that need no storage; checks against the store (such as "the
//! chosen group exists") are added by the services.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::GroupId;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Field-level validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<&'static str, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages for one field, empty if it is valid
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Err with `self` when any message was recorded, otherwise Ok(value)
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Post create/edit form as submitted
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    /// Group id as a string; empty means "no group"
    #[serde(default)]
    pub group: Option<String>,
    /// Reference to an already stored image; empty means "no image"
    #[serde(default)]
    pub image: Option<String>,
}

/// A post form that passed the storage-independent checks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPost {
    pub text: String,
    pub group_id: Option<GroupId>,
    pub image: Option<String>,
}

impl PostForm {
    pub fn clean(&self) -> Result<CleanPost, FormErrors> {
        let mut errors = FormErrors::new();

        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", REQUIRED);
        }

        let group_id = match non_blank(&self.group) {
            None => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(GroupId(id)),
                Err(_) => {
                    errors.add("group", INVALID_CHOICE);
                    None
                }
            },
        };

        errors.into_result(CleanPost {
            text: text.to_string(),
            group_id,
            image: non_blank(&self.image).map(str::to_string),
        })
    }
}

/// Comment form as submitted
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    pub fn clean(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", REQUIRED);
        }
        errors.into_result(text.to_string())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_form(text: &str, group: Option<&str>, image: Option<&str>) -> PostForm {
        PostForm {
            text: text.to_string(),
            group: group.map(str::to_string),
            image: image.map(str::to_string),
        }
    }

    #[test]
    fn post_form_requires_text() {
        let errors = post_form("   ", None, None).clean().unwrap_err();
        assert_eq!(errors.field("text"), [REQUIRED.to_string()]);
        assert!(errors.field("group").is_empty());
    }

    #[test]
    fn post_form_blank_group_means_none() {
        let clean = post_form("Текст поста", Some(""), Some(" ")).clean().unwrap();
        assert_eq!(clean.group_id, None);
        assert_eq!(clean.image, None);
    }

    #[test]
    fn post_form_parses_group_and_trims_text() {
        let clean = post_form("  Текст поста \n", Some("3"), Some("posts/small.gif"))
            .clean()
            .unwrap();
        assert_eq!(clean.text, "Текст поста");
        assert_eq!(clean.group_id, Some(GroupId(3)));
        assert_eq!(clean.image.as_deref(), Some("posts/small.gif"));
    }

    #[test]
    fn post_form_rejects_non_numeric_group() {
        let errors = post_form("text", Some("cats"), None).clean().unwrap_err();
        assert_eq!(errors.field("group"), [INVALID_CHOICE.to_string()]);
    }

    #[test]
    fn post_form_reports_every_bad_field() {
        let errors = post_form("", Some("x"), None).clean().unwrap_err();
        assert!(!errors.field("text").is_empty());
        assert!(!errors.field("group").is_empty());
    }

    #[test]
    fn post_form_deserializes_from_urlencoded_shape() {
        let form: PostForm = serde_json::from_str(r#"{"text": "hello"}"#).unwrap();
        assert_eq!(form.text, "hello");
        assert!(form.group.is_none());
    }

    #[test]
    fn comment_form_requires_text() {
        assert!(CommentForm { text: "\n".to_string() }.clean().is_err());
        assert_eq!(
            CommentForm {
                text: " Текст комментария ".to_string()
            }
            .clean()
            .unwrap(),
            "Текст комментария"
        );
    }
}
