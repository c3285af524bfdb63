use serde::{Deserialize, Serialize};
use serde_repr::Serialize_repr;

/// Meeting length requested from Zoom, in minutes.
pub const MEETING_DURATION_MINUTES: u32 = 60;

/// Server-to-server OAuth token. Used for one request and dropped.
#[derive(Debug, Deserialize)]
pub struct ZoomToken {
    pub access_token: String,

    #[serde(default)]
    pub expires_in: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZoomMeeting {
    pub id: i64,

    #[serde(default)]
    pub topic: String,

    #[serde(default)]
    pub password: String,

    pub join_url: String,
}

#[derive(Debug, Copy, Clone, Serialize_repr)]
#[repr(u8)]
pub enum MeetingType {
    Scheduled = 2,
}

#[derive(Debug, Serialize)]
pub struct MeetingRequest {
    pub topic: String,

    #[serde(rename = "type")]
    pub kind: MeetingType,

    pub password: String,

    pub duration: u32,
}

impl MeetingRequest {
    pub fn scheduled(topic: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            kind: MeetingType::Scheduled,
            password: password.into(),
            duration: MEETING_DURATION_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meeting_request_body() {
        let req = MeetingRequest::scheduled("Standup", "ab12cd34");

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"topic": "Standup", "type": 2, "password": "ab12cd34", "duration": 60})
        );
    }

    #[test]
    fn test_meeting_ignores_extra_fields() {
        let body = r#"{
            "uuid": "abc==",
            "id": 85746065432,
            "topic": "Standup",
            "password": "ab12cd34",
            "join_url": "https://zoom.us/j/85746065432",
            "start_url": "https://zoom.us/s/85746065432"
        }"#;
        let meeting: ZoomMeeting = serde_json::from_str(body).unwrap();

        assert_eq!(meeting.id, 85746065432);
        assert_eq!(meeting.join_url, "https://zoom.us/j/85746065432");
    }
}
