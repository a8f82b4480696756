//! Conversation turns and the mapping from sender labels to prompt roles.

use std::str::FromStr;

use crate::api_types::Message;
use crate::error::ChatError;

/// Sender label of the shopper.
pub const CUSTOMER_SOURCE: &str = "customer";

/// Side of the transcript a turn belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Rendered as `Q:`.
    Query,
    /// Rendered as `A:`.
    Response,
}

/// One prior turn. `role == None` marks an unrecognized sender; such turns
/// are dropped when the transcript is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Option<Role>,
    pub text: String,
}

impl ConversationTurn {
    pub fn new(role: Option<Role>, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// How sender labels collapse onto [`Role`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoleMapping {
    /// `"customer"` is a query, every other label is a response.
    #[default]
    Lenient,
    /// `"customer"` is a query, `"assistant"` and `"assistant/<name>"` are
    /// responses, anything else is unrecognized.
    Strict,
}

impl RoleMapping {
    pub fn role_of(self, source: &str) -> Option<Role> {
        if source == CUSTOMER_SOURCE {
            return Some(Role::Query);
        }
        match self {
            RoleMapping::Lenient => Some(Role::Response),
            RoleMapping::Strict => {
                let is_assistant =
                    source == "assistant" || source.starts_with("assistant/");
                is_assistant.then_some(Role::Response)
            }
        }
    }
}

impl FromStr for RoleMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown role mapping `{other}` (expected lenient|strict)")),
        }
    }
}

/// Splits a message list into the query text and the prior turns.
///
/// With `history_limit > 0` only the last `history_limit` messages are kept
/// (the query included); `0` keeps everything.
///
/// # Errors
/// [`ChatError::InvalidRequest`] if `messages` is empty or the query is blank.
pub fn split_conversation(
    messages: &[Message],
    history_limit: usize,
    mapping: RoleMapping,
) -> Result<(String, Vec<ConversationTurn>), ChatError> {
    let window = if history_limit > 0 && messages.len() > history_limit {
        &messages[messages.len() - history_limit..]
    } else {
        messages
    };

    let (last, prior) = window
        .split_last()
        .ok_or_else(|| ChatError::InvalidRequest("messages must not be empty".into()))?;

    if last.text.trim().is_empty() {
        return Err(ChatError::InvalidRequest(
            "last message (the query) must not be blank".into(),
        ));
    }

    let history = prior
        .iter()
        .map(|m| ConversationTurn::new(mapping.role_of(&m.source), m.text.clone()))
        .collect();

    Ok((last.text.clone(), history))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_maps_everything_but_customer_to_response() {
        let m = RoleMapping::Lenient;
        assert_eq!(m.role_of("customer"), Some(Role::Query));
        assert_eq!(m.role_of("assistant/bruvi"), Some(Role::Response));
        assert_eq!(m.role_of("null"), Some(Role::Response));
        assert_eq!(m.role_of("Customer"), Some(Role::Response));
    }

    #[test]
    fn strict_only_accepts_assistant_labels() {
        let m = RoleMapping::Strict;
        assert_eq!(m.role_of("customer"), Some(Role::Query));
        assert_eq!(m.role_of("assistant"), Some(Role::Response));
        assert_eq!(m.role_of("assistant/tiny_llama_1b"), Some(Role::Response));
        assert_eq!(m.role_of("assistantx"), None);
        assert_eq!(m.role_of("null"), None);
    }

    #[test]
    fn parses_mapping_names() {
        assert_eq!("STRICT".parse::<RoleMapping>(), Ok(RoleMapping::Strict));
        assert_eq!(" lenient ".parse::<RoleMapping>(), Ok(RoleMapping::Lenient));
        assert!("loose".parse::<RoleMapping>().is_err());
    }

    #[test]
    fn last_message_is_query_rest_is_history() {
        let msgs = vec![
            Message::new("Hi", "customer"),
            Message::new("Hello", "assistant/bruvi"),
            Message::new("Price?", "customer"),
        ];
        let (query, history) = split_conversation(&msgs, 0, RoleMapping::Lenient).unwrap();
        assert_eq!(query, "Price?");
        assert_eq!(
            history,
            vec![
                ConversationTurn::new(Some(Role::Query), "Hi"),
                ConversationTurn::new(Some(Role::Response), "Hello"),
            ]
        );
    }

    #[test]
    fn history_limit_keeps_most_recent_messages() {
        let msgs: Vec<Message> = (0..12)
            .map(|i| Message::new(format!("m{i}"), "customer"))
            .collect();
        let (query, history) = split_conversation(&msgs, 10, RoleMapping::Lenient).unwrap();
        assert_eq!(query, "m11");
        assert_eq!(history.len(), 9);
        assert_eq!(history[0].text, "m2");
    }

    #[test]
    fn empty_or_blank_query_is_invalid() {
        assert!(matches!(
            split_conversation(&[], 0, RoleMapping::Lenient),
            Err(ChatError::InvalidRequest(_))
        ));
        assert!(matches!(
            split_conversation(&[Message::new("  ", "customer")], 0, RoleMapping::Lenient),
            Err(ChatError::InvalidRequest(_))
        ));
    }
}
