/*!
 * Typed output schemas for JSON documents.
 *
 * These types describe the structure generated Dialpad and Slack exports must
 * follow. They are used to render the worked examples embedded in prompts so
 * the example always matches the documented key names.
 */

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by Dialpad exports (ISO-8601 with microseconds)
pub const DIALPAD_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Format a timestamp the way Dialpad exports do
pub fn format_dialpad_time(time: &NaiveDateTime) -> String {
    time.format(DIALPAD_TIME_FORMAT).to_string()
}

/// A Dialpad call export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialpadCallExport {
    pub call_id: String,
    pub lines: Vec<DialpadLine>,
}

/// One line of a call: spoken dialogue or a system moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DialpadLine {
    Transcript {
        contact_id: String,
        content: String,
        name: String,
        time: String,
    },
    Moment {
        content: String,
        name: String,
        time: String,
        user_id: String,
    },
}

/// A Slack message with optional reactions and thread replies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackMessage {
    pub user: String,
    pub timestamp: String,
    pub text: String,
    pub channel: String,
    #[serde(default)]
    pub reactions: Vec<SlackReaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
    #[serde(default)]
    pub replies: Vec<SlackReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackReaction {
    pub name: String,
    pub count: u32,
    pub users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackReply {
    pub user: String,
    pub timestamp: String,
    pub text: String,
}

fn example_time(hour: u32, min: u32, sec: u32, micro: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 12)
        .and_then(|date| date.and_hms_micro_opt(hour, min, sec, micro))
        .unwrap_or_default()
}

impl DialpadCallExport {
    /// Short worked example of a call export
    pub fn example() -> Self {
        Self {
            call_id: "5829301746192384".to_string(),
            lines: vec![
                DialpadLine::Transcript {
                    contact_id: "contact_48213".to_string(),
                    content: "Hi, this is Jordan from the provider success team. Do you have a few minutes to talk about your practice?".to_string(),
                    name: "Jordan Reyes".to_string(),
                    time: format_dialpad_time(&example_time(14, 2, 11, 482_913)),
                },
                DialpadLine::Moment {
                    content: "action_item".to_string(),
                    name: "Jordan Reyes".to_string(),
                    time: format_dialpad_time(&example_time(14, 6, 45, 120_004)),
                    user_id: "user_9921".to_string(),
                },
            ],
        }
    }
}

impl SlackMessage {
    /// Short worked example of a threaded message
    pub fn example() -> Self {
        Self {
            user: "Priya Natarajan".to_string(),
            timestamp: "2024-03-12T10:15:00Z".to_string(),
            text: "Heads up: intake form completion dipped this morning, looking into it.".to_string(),
            channel: "#provider-ops".to_string(),
            reactions: vec![SlackReaction {
                name: "eyes".to_string(),
                count: 2,
                users: vec!["Marcus Lee".to_string(), "Dana Whitfield".to_string()],
            }],
            thread_ts: Some("2024-03-12T10:15:00Z".to_string()),
            replies: vec![SlackReply {
                user: "Marcus Lee".to_string(),
                timestamp: "2024-03-12T10:17:00Z".to_string(),
                text: "Seeing the same on mobile, will share numbers shortly.".to_string(),
            }],
        }
    }
}

/// Pretty JSON of a value for embedding in a prompt
pub fn render_example<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}
