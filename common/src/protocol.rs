use serde::{Deserialize, Serialize};

/// Frames a client sends, encoded as `{"event": "...", "data": ...}`.
/// The aliases are the event names older browser clients still emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(alias = "connection-game")]
    Join(String),
    #[serde(alias = "generate-new-board")]
    RegenerateBoard,
    #[serde(alias = "play")]
    DeclareReadyToPlay,
    #[serde(alias = "dial-current-number-shown")]
    DialCurrentNumber,
    #[serde(alias = "next-number")]
    DeclareReadyForNext,
    #[serde(alias = "bingo")]
    ClaimBingo,
}

impl ClientMessage {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to decode client message: {}", e))
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to encode client message: {}", e))
    }
}

/// Roster entry. Boards and marks stay private until the game ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub name: String,
    pub ready_to_play: bool,
    pub ready_for_next: bool,
    pub is_winner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndGameSummary {
    pub board: String,
    pub marked_cells: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    Wait,
    NewBoard(String),
    UpdatePlayers(Vec<PlayerSummary>),
    NumberShown(u8),
    GameStarted,
    DialResponse(bool),
    Winner,
    EndGame(EndGameSummary),
    DrawExhausted,
    Reset,
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to encode server message: {}", e))
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to decode server message: {}", e))
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMessage::Wait => "wait",
            ServerMessage::NewBoard(_) => "new-board",
            ServerMessage::UpdatePlayers(_) => "update-players",
            ServerMessage::NumberShown(_) => "number-shown",
            ServerMessage::GameStarted => "game-started",
            ServerMessage::DialResponse(_) => "dial-response",
            ServerMessage::Winner => "winner",
            ServerMessage::EndGame(_) => "end-game",
            ServerMessage::DrawExhausted => "draw-exhausted",
            ServerMessage::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_decode_join_with_name() {
        let message = ClientMessage::from_json(r#"{"event":"join","data":"Ana"}"#).unwrap();
        assert_eq!(message, ClientMessage::Join("Ana".to_string()));
    }

    #[test]
    fn test_decode_unit_events_without_data() {
        assert_eq!(
            ClientMessage::from_json(r#"{"event":"claim-bingo"}"#).unwrap(),
            ClientMessage::ClaimBingo
        );
        assert_eq!(
            ClientMessage::from_json(r#"{"event":"declare-ready-for-next"}"#).unwrap(),
            ClientMessage::DeclareReadyForNext
        );
    }

    #[test]
    fn test_decode_legacy_event_names() {
        let cases = [
            (r#"{"event":"connection-game","data":"Bo"}"#, ClientMessage::Join("Bo".to_string())),
            (r#"{"event":"generate-new-board"}"#, ClientMessage::RegenerateBoard),
            (r#"{"event":"play"}"#, ClientMessage::DeclareReadyToPlay),
            (r#"{"event":"dial-current-number-shown"}"#, ClientMessage::DialCurrentNumber),
            (r#"{"event":"next-number"}"#, ClientMessage::DeclareReadyForNext),
            (r#"{"event":"bingo"}"#, ClientMessage::ClaimBingo),
        ];
        for (text, expected) in cases {
            assert_eq!(ClientMessage::from_json(text).unwrap(), expected, "{}", text);
        }
    }

    #[test]
    fn test_decode_rejects_unknown_event() {
        assert!(ClientMessage::from_json(r#"{"event":"cheat"}"#).is_err());
        assert!(ClientMessage::from_json("not json").is_err());
    }

    #[test]
    fn test_roster_uses_camel_case_fields() {
        let message = ServerMessage::UpdatePlayers(vec![PlayerSummary {
            name: "Ana".to_string(),
            ready_to_play: true,
            ready_for_next: false,
            is_winner: false,
        }]);
        let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "event": "update-players",
                "data": [{"name": "Ana", "readyToPlay": true, "readyForNext": false, "isWinner": false}]
            })
        );
    }

    #[test]
    fn test_end_game_payload_shape() {
        let message = ServerMessage::EndGame(EndGameSummary {
            board: "1-2".to_string(),
            marked_cells: vec![4, 9],
        });
        let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();

        assert_eq!(value["event"], "end-game");
        assert_eq!(value["data"]["board"], "1-2");
        assert_eq!(value["data"]["markedCells"], json!([4, 9]));
    }

    #[test]
    fn test_event_name_matches_encoded_tag() {
        let messages = [
            ServerMessage::Wait,
            ServerMessage::NumberShown(7),
            ServerMessage::DialResponse(true),
            ServerMessage::DrawExhausted,
            ServerMessage::Reset,
        ];
        for message in messages {
            let value: Value = serde_json::from_str(&message.to_json().unwrap()).unwrap();
            assert_eq!(value["event"], message.event_name());
        }
    }
}
